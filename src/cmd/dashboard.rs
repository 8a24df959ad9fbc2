use crate::context::AppContext;
use crate::domain::listing::TicketStats;
use crate::error::AppResult;

pub fn run(ctx: &AppContext) -> AppResult<TicketStats> {
    ctx.guard().require("dashboard")?;
    let repo = ctx.open_repository()?;
    Ok(TicketStats::from_tickets(repo.tickets()))
}

pub fn render(stats: &TicketStats) -> String {
    format!(
        "Total     {}\nOpen      {}\nResolved  {}",
        stats.total, stats.open, stats.resolved
    )
}
