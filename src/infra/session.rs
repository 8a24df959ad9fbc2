use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::session::{Credentials, SessionRecord};
use crate::error::{AppError, AppResult};
use crate::services::{Clock, KeyValueStore, SessionManager};

pub const SESSION_KEY: &str = "ticketapp_session";

/// Keeps the session record next to the ticket data. A record older than
/// the TTL no longer authenticates.
pub struct StoredSessionManager {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl StoredSessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { store, clock, ttl }
    }
}

impl SessionManager for StoredSessionManager {
    fn current(&self) -> AppResult<Option<SessionRecord>> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| AppError::Storage(format!("invalid session record: {err}")))
    }

    fn issue(&self, credentials: &Credentials) -> AppResult<SessionRecord> {
        let record = SessionRecord {
            token: Uuid::new_v4().to_string(),
            user_email: credentials.email().to_string(),
            issued_at: self.clock.now(),
        };
        let data = serde_json::to_string(&record)
            .map_err(|err| AppError::Storage(format!("failed to encode session: {err}")))?;
        self.store.set(SESSION_KEY, &data)?;
        debug!(user = %record.user_email, "session issued");
        Ok(record)
    }

    fn clear(&self) -> AppResult<()> {
        self.store.remove(SESSION_KEY)
    }

    fn is_authenticated(&self) -> bool {
        match self.current() {
            Ok(Some(record)) => !record.is_expired(self.clock.now(), self.ttl),
            Ok(None) => false,
            Err(err) => {
                warn!(error = %err, "treating unreadable session as signed out");
                false
            }
        }
    }
}
