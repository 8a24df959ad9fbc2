use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::ticket::Ticket;
use crate::domain::validation::{normalize_title, validate};
use crate::error::{AppError, AppResult};
use crate::services::KeyValueStore;

pub const DEFAULT_TICKETS_KEY: &str = "ticketapp_tickets";

/// Reads and writes the whole ticket collection as one JSON document under
/// a single key.
pub struct TicketPersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl TicketPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// An absent or blank value is an empty collection; anything else must
    /// decode cleanly.
    pub fn read(&self) -> AppResult<Vec<Ticket>> {
        match self.store.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => decode(&raw),
            _ => {
                debug!(key = %self.key, "no stored tickets");
                Ok(Vec::new())
            }
        }
    }

    pub fn write(&self, tickets: &[Ticket]) -> AppResult<()> {
        let data = encode(tickets)?;
        self.store.set(&self.key, &data)
    }
}

pub fn encode(tickets: &[Ticket]) -> AppResult<String> {
    serde_json::to_string_pretty(tickets)
        .map_err(|err| AppError::Storage(format!("failed to encode tickets: {err}")))
}

pub fn decode(raw: &str) -> AppResult<Vec<Ticket>> {
    let tickets = serde_json::from_str::<Vec<Ticket>>(raw)
        .map_err(|err| AppError::StorageCorrupt(err.to_string()))?;

    let mut seen = HashSet::with_capacity(tickets.len());
    for ticket in &tickets {
        if !seen.insert(&ticket.id) {
            return Err(AppError::StorageCorrupt(format!(
                "duplicate ticket id {}",
                ticket.id
            )));
        }
        if ticket.updated_at < ticket.created_at {
            return Err(AppError::StorageCorrupt(format!(
                "ticket {} was updated before it was created",
                ticket.id
            )));
        }
        validate(
            &ticket.title,
            ticket.status.as_str(),
            ticket.description_or_empty(),
        )
        .map_err(|err| AppError::StorageCorrupt(format!("ticket {}: {err}", ticket.id)))?;
        if ticket.title != normalize_title(&ticket.title) {
            return Err(AppError::StorageCorrupt(format!(
                "ticket {} has an unnormalized title",
                ticket.id
            )));
        }
    }
    Ok(tickets)
}
