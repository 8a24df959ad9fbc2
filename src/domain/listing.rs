use crate::domain::ticket::{Ticket, TicketStatus};

/// Most recently created first. The sort is stable, so tickets created in
/// the same millisecond keep their storage order.
pub fn sorted_for_display(tickets: &[Ticket]) -> Vec<&Ticket> {
    let mut sorted = tickets.iter().collect::<Vec<_>>();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
}

impl TicketStats {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        tickets.iter().fold(Self::default(), |mut stats, ticket| {
            stats.total += 1;
            match ticket.status {
                TicketStatus::Open => stats.open += 1,
                TicketStatus::Closed => stats.resolved += 1,
                TicketStatus::InProgress => {}
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::TicketId;
    use chrono::{Duration, TimeZone, Utc};

    fn ticket(id: &str, offset_ms: i64, status: TicketStatus) -> Ticket {
        let created =
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + Duration::milliseconds(offset_ms);
        Ticket {
            id: TicketId::new(id),
            title: id.to_string(),
            description: None,
            status,
            priority: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn newest_first() {
        let tickets = vec![
            ticket("a", 0, TicketStatus::Open),
            ticket("c", 2, TicketStatus::Open),
            ticket("b", 1, TicketStatus::Open),
        ];
        let ids = sorted_for_display(&tickets)
            .into_iter()
            .map(|t| t.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn ties_keep_storage_order() {
        let tickets = vec![
            ticket("first", 5, TicketStatus::Open),
            ticket("second", 5, TicketStatus::Open),
        ];
        let ids = sorted_for_display(&tickets)
            .into_iter()
            .map(|t| t.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn counts_by_status() {
        let tickets = vec![
            ticket("a", 0, TicketStatus::Open),
            ticket("b", 1, TicketStatus::InProgress),
            ticket("c", 2, TicketStatus::Closed),
            ticket("d", 3, TicketStatus::Open),
        ];
        assert_eq!(
            TicketStats::from_tickets(&tickets),
            TicketStats {
                total: 4,
                open: 2,
                resolved: 1,
            }
        );
        assert_eq!(TicketStats::from_tickets(&[]), TicketStats::default());
    }
}
