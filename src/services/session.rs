use crate::domain::session::{Credentials, SessionRecord};
use crate::error::AppResult;

pub trait SessionManager: Send + Sync {
    fn current(&self) -> AppResult<Option<SessionRecord>>;
    fn issue(&self, credentials: &Credentials) -> AppResult<SessionRecord>;
    fn clear(&self) -> AppResult<()>;
    fn is_authenticated(&self) -> bool;
}
