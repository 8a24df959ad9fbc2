use crate::domain::ticket::{Ticket, TicketId, TicketPatch};
use crate::domain::validation::validate;
use crate::error::AppResult;
use crate::repository::{TicketRepository, UpdateOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub status: String,
    pub description: String,
}

impl Draft {
    fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            title: ticket.title.clone(),
            status: ticket.status.as_str().to_string(),
            description: ticket.description_or_empty().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Saved(Ticket),
    /// The draft matched the stored ticket; nothing was written.
    Unchanged,
    /// The ticket disappeared from the repository.
    Missing,
}

/// Scratch copy of one ticket's editable fields. Never persisted on its
/// own; changes reach storage only through [`EditSession::commit`].
#[derive(Debug, Clone)]
pub struct EditSession {
    ticket_id: TicketId,
    draft: Draft,
    editing: bool,
}

impl EditSession {
    pub fn seed(ticket: &Ticket) -> Self {
        Self {
            ticket_id: ticket.id.clone(),
            draft: Draft::from_ticket(ticket),
            editing: false,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn begin(&mut self) {
        self.editing = true;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.editing = true;
        self.draft.title = title.into();
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.editing = true;
        self.draft.status = status.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.editing = true;
        self.draft.description = description.into();
    }

    pub fn is_dirty(&self, authoritative: &Ticket) -> bool {
        self.draft != Draft::from_ticket(authoritative)
    }

    /// Validates the draft and writes it through `TicketRepository::update`.
    /// A validation failure keeps the session in editing mode with the draft
    /// intact.
    pub fn commit(&mut self, repo: &mut TicketRepository) -> AppResult<CommitOutcome> {
        let Some(current) = repo.get(&self.ticket_id) else {
            return Ok(CommitOutcome::Missing);
        };
        if !self.is_dirty(current) {
            return Ok(CommitOutcome::Unchanged);
        }

        let fields = validate(
            &self.draft.title,
            &self.draft.status,
            &self.draft.description,
        )?;
        let patch = TicketPatch {
            title: Some(fields.title),
            status: Some(fields.status.as_str().to_string()),
            description: Some(fields.description.unwrap_or_default()),
            priority: None,
        };

        match repo.update(&self.ticket_id, patch)? {
            UpdateOutcome::Updated(ticket) => {
                self.draft = Draft::from_ticket(&ticket);
                self.editing = false;
                Ok(CommitOutcome::Saved(ticket))
            }
            UpdateOutcome::Missing => Ok(CommitOutcome::Missing),
        }
    }

    /// Drops unsaved changes.
    pub fn cancel(&mut self, authoritative: &Ticket) {
        self.draft = Draft::from_ticket(authoritative);
        self.editing = false;
    }

    /// Follows the stored ticket while the user is not editing.
    pub fn sync(&mut self, authoritative: &Ticket) {
        if !self.editing {
            self.draft = Draft::from_ticket(authoritative);
        }
    }
}
