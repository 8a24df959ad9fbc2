use clap::Args;
use tracing::info;

use crate::context::AppContext;
use crate::domain::session::Credentials;
use crate::error::AppResult;
use crate::workflow::access::DEFAULT_LANDING;

#[derive(Args, Debug, Clone)]
pub struct CredentialArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
}

pub struct SignedIn {
    pub email: String,
    pub next: String,
}

/// Issues a session and hands back the location the user was sent away
/// from, if any.
pub fn login(ctx: &AppContext, args: CredentialArgs) -> AppResult<SignedIn> {
    let credentials = Credentials::parse(&args.email, &args.password)?;
    let record = ctx.sessions.issue(&credentials)?;
    let next = ctx.guard().take_return_to()?;
    info!(user = %record.user_email, "signed in");
    Ok(SignedIn {
        email: record.user_email,
        next,
    })
}

/// Same checks as login; a new account always lands on the dashboard.
pub fn signup(ctx: &AppContext, args: CredentialArgs) -> AppResult<SignedIn> {
    let credentials = Credentials::parse(&args.email, &args.password)?;
    let record = ctx.sessions.issue(&credentials)?;
    info!(user = %record.user_email, "account created");
    Ok(SignedIn {
        email: record.user_email,
        next: DEFAULT_LANDING.to_string(),
    })
}

pub fn logout(ctx: &AppContext) -> AppResult<()> {
    ctx.sessions.clear()?;
    info!("signed out");
    Ok(())
}
