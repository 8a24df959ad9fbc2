use std::sync::Arc;

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::{KeyValueStore, SessionManager};

pub const LOGIN_ENTRY: &str = "login";
pub const DEFAULT_LANDING: &str = "dashboard";
pub const RETURN_TO_KEY: &str = "ticketapp_return_to";
pub const EXPIRED_REASON: &str = "Your session has expired, please log in again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    pub to: &'static str,
    pub from: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(LoginRedirect),
}

/// Gates protected commands on the session and remembers where a signed-out
/// user was headed.
pub struct AccessGuard {
    sessions: Arc<dyn SessionManager>,
    store: Arc<dyn KeyValueStore>,
}

impl AccessGuard {
    pub fn new(sessions: Arc<dyn SessionManager>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { sessions, store }
    }

    pub fn check(&self, requested: &str) -> Access {
        if self.sessions.is_authenticated() {
            return Access::Granted;
        }
        Access::Redirect(LoginRedirect {
            to: LOGIN_ENTRY,
            from: requested.to_string(),
            reason: EXPIRED_REASON,
        })
    }

    pub fn require(&self, requested: &str) -> AppResult<()> {
        match self.check(requested) {
            Access::Granted => Ok(()),
            Access::Redirect(redirect) => {
                debug!(from = %redirect.from, "redirecting to login");
                self.store.set(RETURN_TO_KEY, &redirect.from)?;
                Err(AppError::Unauthenticated {
                    from: redirect.from,
                    reason: redirect.reason.to_string(),
                })
            }
        }
    }

    /// Where to send the user after a successful login. Consumes the
    /// remembered location.
    pub fn take_return_to(&self) -> AppResult<String> {
        let remembered = self.store.get(RETURN_TO_KEY)?;
        if remembered.is_some() {
            self.store.remove(RETURN_TO_KEY)?;
        }
        Ok(remembered
            .filter(|location| !location.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANDING.to_string()))
    }
}
