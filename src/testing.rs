use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::infra::MemoryStore;
use crate::repository::{DEFAULT_TICKETS_KEY, TicketPersistence, TicketRepository};
use crate::services::{Clock, Notifier};

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Repository over an in-memory store with a manual clock.
pub struct TestRepository {
    pub repo: TicketRepository,
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
}

impl TestRepository {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::default());
        let repo = repository_over(&store, &clock);
        Self { repo, store, clock }
    }

    /// A second repository sharing this one's store, as a restarted process
    /// would see it. Not loaded yet.
    pub fn reopen(&self) -> TicketRepository {
        repository_over(&self.store, &self.clock)
    }
}

fn repository_over(store: &Arc<MemoryStore>, clock: &Arc<ManualClock>) -> TicketRepository {
    TicketRepository::new(
        TicketPersistence::new(store.clone(), DEFAULT_TICKETS_KEY),
        clock.clone(),
    )
}

/// Context over an in-memory store, signed out.
pub fn test_context() -> crate::context::AppContext {
    use crate::config::AppConfig;
    use crate::context::AppContext;
    use crate::infra::StoredSessionManager;

    let config = AppConfig {
        data_dir: std::path::PathBuf::from("/nonexistent/ticketdesk"),
        storage_key: DEFAULT_TICKETS_KEY.to_string(),
        session_ttl: Duration::hours(24),
        log_filter: None,
    };
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::default());
    let sessions = Arc::new(StoredSessionManager::new(
        store.clone(),
        clock.clone(),
        config.session_ttl,
    ));
    AppContext::new(
        config,
        store,
        clock,
        sessions,
        Arc::new(RecordingNotifier::default()),
    )
}
