use std::sync::Arc;

use tracing::debug;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::repository::{TicketPersistence, TicketRepository};
use crate::services::{Clock, KeyValueStore, Notifier, SessionManager};
use crate::workflow::access::AccessGuard;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
    pub sessions: Arc<dyn SessionManager>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        sessions: Arc<dyn SessionManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
            sessions,
            notifier,
        }
    }

    pub fn guard(&self) -> AccessGuard {
        AccessGuard::new(self.sessions.clone(), self.store.clone())
    }

    /// Builds the repository for this run and loads it from storage.
    pub fn open_repository(&self) -> AppResult<TicketRepository> {
        let persistence = TicketPersistence::new(self.store.clone(), self.config.storage_key.clone());
        let mut repo = TicketRepository::new(persistence, self.clock.clone());
        repo.subscribe(|tickets| debug!(count = tickets.len(), "ticket collection changed"));
        repo.load()?;
        Ok(repo)
    }
}
