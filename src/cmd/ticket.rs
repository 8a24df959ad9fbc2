use std::io::{self, Write};

use chrono::Local;
use clap::{Args, Subcommand};

use crate::context::AppContext;
use crate::domain::listing::sorted_for_display;
use crate::domain::ticket::{NewTicket, Priority, Ticket};
use crate::error::AppResult;
use crate::workflow::ticket::{
    EditWorkflowOutcome, TicketChanges, create_ticket, delete_ticket, edit_ticket,
};

#[derive(Args, Debug, Clone)]
pub struct TicketArgs {
    #[command(subcommand)]
    pub command: TicketCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TicketCommand {
    /// List tickets, newest first.
    List,
    /// Create a ticket.
    Create(CreateArgs),
    /// Change a ticket's title, status or description.
    Edit(EditArgs),
    /// Delete a ticket.
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Short summary, 1-120 characters.
    #[arg(short, long)]
    pub title: String,
    /// open, in_progress or closed.
    #[arg(short, long, default_value = "open")]
    pub status: String,
    /// Optional, up to 2000 characters.
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(short, long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Ticket id or a unique prefix of it.
    pub id: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub status: Option<String>,
    /// Pass an empty string to clear it.
    #[arg(short, long)]
    pub description: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Ticket id or a unique prefix of it.
    pub id: String,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

pub fn run(ctx: &AppContext, command: TicketCommand) -> AppResult<()> {
    match command {
        TicketCommand::List => run_list(ctx),
        TicketCommand::Create(args) => run_create(ctx, args),
        TicketCommand::Edit(args) => run_edit(ctx, args),
        TicketCommand::Delete(args) => run_delete(ctx, args),
    }
}

fn run_list(ctx: &AppContext) -> AppResult<()> {
    ctx.guard().require("ticket list")?;
    let repo = ctx.open_repository()?;

    let sorted = sorted_for_display(repo.tickets());
    if sorted.is_empty() {
        println!("No tickets yet.");
        return Ok(());
    }
    for ticket in sorted {
        println!("{}\n", render_ticket(ticket));
    }
    Ok(())
}

fn run_create(ctx: &AppContext, args: CreateArgs) -> AppResult<()> {
    ctx.guard().require("ticket create")?;
    let mut repo = ctx.open_repository()?;

    let new = NewTicket {
        title: args.title,
        description: args.description,
        status: args.status,
        priority: args.priority,
    };
    let ticket = create_ticket(&mut repo, ctx.notifier.as_ref(), new)?;
    println!("{}", render_ticket(&ticket));
    Ok(())
}

fn run_edit(ctx: &AppContext, args: EditArgs) -> AppResult<()> {
    ctx.guard().require("ticket edit")?;
    let mut repo = ctx.open_repository()?;

    let changes = TicketChanges {
        title: args.title,
        status: args.status,
        description: args.description,
    };
    match edit_ticket(&mut repo, ctx.notifier.as_ref(), &args.id, changes)? {
        EditWorkflowOutcome::Saved(ticket) => println!("{}", render_ticket(&ticket)),
        EditWorkflowOutcome::Unchanged(ticket) => {
            println!("Nothing to change for ticket {}.", ticket.id.short())
        }
    }
    Ok(())
}

fn run_delete(ctx: &AppContext, args: DeleteArgs) -> AppResult<()> {
    ctx.guard().require("ticket delete")?;
    let mut repo = ctx.open_repository()?;

    let target = repo.resolve(&args.id)?;
    if !args.yes && !confirm("Delete this ticket?")? {
        println!("Kept ticket {}.", target.id.short());
        return Ok(());
    }

    let deleted = delete_ticket(&mut repo, ctx.notifier.as_ref(), &args.id)?;
    println!("Deleted ticket {}.", deleted.id.short());
    Ok(())
}

pub fn render_ticket(ticket: &Ticket) -> String {
    let mut out = format!(
        "{}  [{}]  {}",
        ticket.id.short(),
        ticket.status.as_str(),
        ticket.title
    );
    if let Some(priority) = ticket.priority {
        out.push_str(&format!("  ({})", priority.as_str()));
    }
    if let Some(description) = &ticket.description {
        for line in description.lines() {
            out.push_str(&format!("\n    {line}"));
        }
    }
    out.push_str(&format!(
        "\n    Created {} • Updated {}",
        ticket.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        ticket.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
    ));
    out
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::from_str(value).ok_or_else(|| "expected low, medium or high".to_string())
}

fn confirm(question: &str) -> AppResult<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{question} [y/N]: ")?;
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(is_affirmative(&input))
}

fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::{TicketId, TicketStatus};
    use chrono::{TimeZone, Utc};

    #[test]
    fn renders_summary_line_and_description() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let ticket = Ticket {
            id: TicketId::new("0123456789abcdef"),
            title: "Fix login bug".to_string(),
            description: Some("first\nsecond".to_string()),
            status: TicketStatus::InProgress,
            priority: Some(Priority::High),
            created_at: at,
            updated_at: at,
        };

        let rendered = render_ticket(&ticket);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "01234567  [in_progress]  Fix login bug  (high)");
        assert_eq!(lines[1], "    first");
        assert_eq!(lines[2], "    second");
        assert!(lines[3].starts_with("    Created "));
    }

    #[test]
    fn parses_priority_argument() {
        assert_eq!(parse_priority("Medium"), Ok(Priority::Medium));
        assert!(parse_priority("urgent").is_err());
    }

    #[test]
    fn only_yes_confirms() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" YES "));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("nope"));
    }
}
