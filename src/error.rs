use std::io;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Title too long (max 120)")]
    TitleTooLong,
    #[error("Invalid status")]
    InvalidStatus,
    #[error("Description too long (max 2000)")]
    DescriptionTooLong,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("stored tickets are unreadable: {0}")]
    StorageCorrupt(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("{0}")]
    Credentials(String),
    #[error("{reason} Run `ticketdesk login`, then retry `ticketdesk {from}`.")]
    Unauthenticated { from: String, reason: String },
    #[error("ticket id prefix '{0}' matches more than one ticket")]
    AmbiguousId(String),
    #[error("no ticket matches '{0}'")]
    UnknownTicket(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
