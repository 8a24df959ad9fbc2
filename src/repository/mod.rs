pub mod persistence;
pub mod subscription;

use std::sync::Arc;

use tracing::debug;

use crate::domain::ticket::{NewTicket, Ticket, TicketId, TicketPatch};
use crate::domain::validation::validate;
use crate::error::{AppError, AppResult};
use crate::services::Clock;

pub use persistence::{DEFAULT_TICKETS_KEY, TicketPersistence};
pub use subscription::SubscriptionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated(Ticket),
    /// No ticket carries the id; nothing was written and nobody was notified.
    Missing,
}

/// Authoritative owner of the ticket collection.
///
/// Every mutation validates first, then writes the complete next collection
/// through [`TicketPersistence`], and only after the write succeeds swaps the
/// in-memory state and notifies subscribers. A failed call leaves memory,
/// storage and subscribers exactly as they were.
pub struct TicketRepository {
    tickets: Vec<Ticket>,
    persistence: TicketPersistence,
    clock: Arc<dyn Clock>,
    subscribers: subscription::Subscribers,
}

impl TicketRepository {
    pub fn new(persistence: TicketPersistence, clock: Arc<dyn Clock>) -> Self {
        Self {
            tickets: Vec::new(),
            persistence,
            clock,
            subscribers: subscription::Subscribers::default(),
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn get(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|ticket| &ticket.id == id)
    }

    /// Finds a ticket by full id or by a prefix that matches exactly one id.
    pub fn resolve(&self, needle: &str) -> AppResult<&Ticket> {
        let needle = needle.trim();
        if needle.is_empty() {
            return Err(AppError::UnknownTicket(needle.to_string()));
        }
        if let Some(exact) = self.tickets.iter().find(|t| t.id.as_str() == needle) {
            return Ok(exact);
        }

        let mut matches = self
            .tickets
            .iter()
            .filter(|t| t.id.as_str().starts_with(needle));
        match (matches.next(), matches.next()) {
            (Some(ticket), None) => Ok(ticket),
            (Some(_), Some(_)) => Err(AppError::AmbiguousId(needle.to_string())),
            (None, _) => Err(AppError::UnknownTicket(needle.to_string())),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&[Ticket]) + 'static) -> SubscriptionId {
        self.subscribers.add(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn load(&mut self) -> AppResult<()> {
        let tickets = self.persistence.read()?;
        debug!(key = self.persistence.key(), count = tickets.len(), "loaded tickets");
        self.tickets = tickets;
        self.subscribers.notify(&self.tickets);
        Ok(())
    }

    pub fn create(&mut self, new: NewTicket) -> AppResult<TicketId> {
        let fields = validate(
            &new.title,
            &new.status,
            new.description.as_deref().unwrap_or(""),
        )?;

        let now = self.clock.now();
        let ticket = Ticket {
            id: self.allocate_id(),
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: new.priority,
            created_at: now,
            updated_at: now,
        };
        let id = ticket.id.clone();

        let mut next = Vec::with_capacity(self.tickets.len() + 1);
        next.push(ticket);
        next.extend(self.tickets.iter().cloned());
        self.commit(next)?;

        debug!(id = %id, "created ticket");
        Ok(id)
    }

    /// Merges `patch` onto the ticket and re-validates the result. A missing
    /// id is not an error.
    pub fn update(&mut self, id: &TicketId, patch: TicketPatch) -> AppResult<UpdateOutcome> {
        let Some(index) = self.tickets.iter().position(|t| &t.id == id) else {
            debug!(id = %id, "update skipped, no such ticket");
            return Ok(UpdateOutcome::Missing);
        };

        let current = &self.tickets[index];
        let fields = validate(
            patch.title.as_deref().unwrap_or(&current.title),
            patch.status.as_deref().unwrap_or(current.status.as_str()),
            patch
                .description
                .as_deref()
                .unwrap_or(current.description_or_empty()),
        )?;

        let updated = Ticket {
            id: current.id.clone(),
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: patch.priority.or(current.priority),
            created_at: current.created_at,
            updated_at: self.clock.now().max(current.created_at),
        };

        let mut next = self.tickets.clone();
        next[index] = updated.clone();
        self.commit(next)?;

        debug!(id = %id, "updated ticket");
        Ok(UpdateOutcome::Updated(updated))
    }

    /// Returns whether a ticket was removed. A missing id leaves storage
    /// untouched.
    pub fn remove(&mut self, id: &TicketId) -> AppResult<bool> {
        if self.get(id).is_none() {
            debug!(id = %id, "remove skipped, no such ticket");
            return Ok(false);
        }

        let next = self
            .tickets
            .iter()
            .filter(|ticket| &ticket.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        debug!(id = %id, "removed ticket");
        Ok(true)
    }

    fn allocate_id(&self) -> TicketId {
        loop {
            let id = TicketId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self, next: Vec<Ticket>) -> AppResult<()> {
        self.persistence.write(&next)?;
        self.tickets = next;
        debug!(listeners = self.subscribers.len(), "broadcasting tickets");
        self.subscribers.notify(&self.tickets);
        Ok(())
    }
}
