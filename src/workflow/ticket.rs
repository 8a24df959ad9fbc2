use tracing::info;

use crate::domain::ticket::{NewTicket, Ticket};
use crate::error::{AppError, AppResult};
use crate::repository::TicketRepository;
use crate::services::Notifier;
use crate::workflow::edit_session::{CommitOutcome, EditSession};

/// Field edits requested for an existing ticket; `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct TicketChanges {
    pub title: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
}

pub enum EditWorkflowOutcome {
    Saved(Ticket),
    Unchanged(Ticket),
}

pub fn create_ticket(
    repo: &mut TicketRepository,
    notifier: &dyn Notifier,
    new: NewTicket,
) -> AppResult<Ticket> {
    let id = repo.create(new)?;
    let ticket = repo
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::UnknownTicket(id.to_string()))?;

    info!(id = %ticket.id, title = %ticket.title, "ticket created");
    notifier.notify("Ticket created");
    Ok(ticket)
}

pub fn edit_ticket(
    repo: &mut TicketRepository,
    notifier: &dyn Notifier,
    needle: &str,
    changes: TicketChanges,
) -> AppResult<EditWorkflowOutcome> {
    let ticket = repo.resolve(needle)?.clone();

    let mut session = EditSession::seed(&ticket);
    session.begin();
    if let Some(title) = changes.title {
        session.set_title(title);
    }
    if let Some(status) = changes.status {
        session.set_status(status);
    }
    if let Some(description) = changes.description {
        session.set_description(description);
    }

    match session.commit(repo)? {
        CommitOutcome::Saved(saved) => {
            info!(id = %saved.id, "ticket updated");
            notifier.notify("Ticket updated");
            Ok(EditWorkflowOutcome::Saved(saved))
        }
        CommitOutcome::Unchanged => Ok(EditWorkflowOutcome::Unchanged(ticket)),
        CommitOutcome::Missing => Err(AppError::UnknownTicket(needle.to_string())),
    }
}

pub fn delete_ticket(
    repo: &mut TicketRepository,
    notifier: &dyn Notifier,
    needle: &str,
) -> AppResult<Ticket> {
    let ticket = repo.resolve(needle)?.clone();
    if !repo.remove(&ticket.id)? {
        return Err(AppError::UnknownTicket(needle.to_string()));
    }

    info!(id = %ticket.id, "ticket deleted");
    notifier.notify("Ticket deleted");
    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::TicketStatus;
    use crate::error::ValidationError;
    use crate::testing::{RecordingNotifier, TestRepository};

    #[test]
    fn create_notifies_on_success_only() {
        let mut fixture = TestRepository::new();
        let notifier = RecordingNotifier::default();

        let ticket =
            create_ticket(&mut fixture.repo, &notifier, NewTicket::new("Ship v1", "open")).unwrap();
        assert_eq!(ticket.title, "Ship v1");

        let err = create_ticket(&mut fixture.repo, &notifier, NewTicket::new("", "open"))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::EmptyTitle)));
        assert_eq!(notifier.messages(), vec!["Ticket created".to_string()]);
    }

    #[test]
    fn edit_by_prefix_saves_changes() {
        let mut fixture = TestRepository::new();
        let notifier = RecordingNotifier::default();
        let ticket =
            create_ticket(&mut fixture.repo, &notifier, NewTicket::new("Ship v1", "open")).unwrap();

        let changes = TicketChanges {
            status: Some("closed".to_string()),
            ..TicketChanges::default()
        };
        let outcome = edit_ticket(&mut fixture.repo, &notifier, ticket.id.short(), changes).unwrap();

        let EditWorkflowOutcome::Saved(saved) = outcome else {
            panic!("expected a save");
        };
        assert_eq!(saved.status, TicketStatus::Closed);
        assert_eq!(saved.title, "Ship v1");
        assert_eq!(notifier.messages().last().map(String::as_str), Some("Ticket updated"));
    }

    #[test]
    fn edit_without_changes_is_reported_unchanged() {
        let mut fixture = TestRepository::new();
        let notifier = RecordingNotifier::default();
        let ticket =
            create_ticket(&mut fixture.repo, &notifier, NewTicket::new("Ship v1", "open")).unwrap();

        let changes = TicketChanges {
            title: Some("Ship v1".to_string()),
            ..TicketChanges::default()
        };
        let outcome = edit_ticket(&mut fixture.repo, &notifier, ticket.id.as_str(), changes).unwrap();

        assert!(matches!(outcome, EditWorkflowOutcome::Unchanged(_)));
        assert_eq!(notifier.messages().len(), 1);
    }

    #[test]
    fn edit_with_invalid_status_fails() {
        let mut fixture = TestRepository::new();
        let notifier = RecordingNotifier::default();
        let ticket =
            create_ticket(&mut fixture.repo, &notifier, NewTicket::new("Ship v1", "open")).unwrap();

        let changes = TicketChanges {
            status: Some("done".to_string()),
            ..TicketChanges::default()
        };
        let result = edit_ticket(&mut fixture.repo, &notifier, ticket.id.as_str(), changes);

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::InvalidStatus))
        ));
        assert_eq!(fixture.repo.get(&ticket.id).unwrap().status, TicketStatus::Open);
    }

    #[test]
    fn delete_removes_and_notifies() {
        let mut fixture = TestRepository::new();
        let notifier = RecordingNotifier::default();
        let ticket =
            create_ticket(&mut fixture.repo, &notifier, NewTicket::new("Ship v1", "open")).unwrap();

        let deleted = delete_ticket(&mut fixture.repo, &notifier, ticket.id.as_str()).unwrap();
        assert_eq!(deleted.id, ticket.id);
        assert!(fixture.repo.tickets().is_empty());
        assert_eq!(notifier.messages().last().map(String::as_str), Some("Ticket deleted"));

        assert!(matches!(
            delete_ticket(&mut fixture.repo, &notifier, ticket.id.as_str()),
            Err(AppError::UnknownTicket(_))
        ));
    }
}
