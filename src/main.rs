use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};

use ticketdesk::cmd::auth::{self, CredentialArgs};
use ticketdesk::cmd::config::{self as config_cmd, ConfigArgs};
use ticketdesk::cmd::dashboard;
use ticketdesk::cmd::ticket::{self, TicketArgs};
use ticketdesk::config::AppConfig;
use ticketdesk::context::AppContext;
use ticketdesk::error::AppResult;
use ticketdesk::infra::{ConsoleNotifier, FileStore, StoredSessionManager};
use ticketdesk::services::{Clock, KeyValueStore, SystemClock};
use ticketdesk::telemetry;

#[derive(Parser)]
#[command(name = "ticketdesk", author, version, about = "Local ticket tracker")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Desk(DeskCommand),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

/// Commands that run against the ticket store and session.
#[derive(Subcommand)]
enum DeskCommand {
    /// Sign in on this device.
    Login(CredentialArgs),
    /// Create an account and sign in.
    Signup(CredentialArgs),
    /// Sign out on this device.
    Logout,
    /// Show ticket counts.
    Dashboard,
    /// Work with tickets.
    Ticket(TicketArgs),
}

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `config` must stay usable when the stored settings are invalid.
    let config = AppConfig::load();
    let configured_filter = config.as_ref().ok().and_then(|cfg| cfg.log_filter.as_deref());
    telemetry::init(cli.verbose, configured_filter);

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Desk(command) => {
            let context = build_context(config?);
            run_desk(&context, command)
        }
    }
}

fn build_context(config: AppConfig) -> AppContext {
    tracing::debug!(data_dir = %config.data_dir.display(), key = %config.storage_key, "configuration loaded");

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.data_dir.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let sessions = Arc::new(StoredSessionManager::new(
        store.clone(),
        clock.clone(),
        config.session_ttl,
    ));

    AppContext::new(config, store, clock, sessions, Arc::new(ConsoleNotifier))
}

fn run_desk(context: &AppContext, command: DeskCommand) -> AppResult<()> {
    match command {
        DeskCommand::Login(args) => {
            let signed_in = auth::login(context, args)?;
            println!("Signed in as {}.", signed_in.email);
            println!("Continue with: ticketdesk {}", signed_in.next);
        }
        DeskCommand::Signup(args) => {
            let signed_in = auth::signup(context, args)?;
            println!("Account created for {}.", signed_in.email);
            println!("Continue with: ticketdesk {}", signed_in.next);
        }
        DeskCommand::Logout => {
            auth::logout(context)?;
            println!("Signed out.");
        }
        DeskCommand::Dashboard => {
            let stats = dashboard::run(context)?;
            println!("{}", dashboard::render(&stats));
        }
        DeskCommand::Ticket(args) => ticket::run(context, args.command)?,
    }
    Ok(())
}
