use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{AppConfig, StoredConfig, config_file_path};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration and the values in effect.
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring ticketdesk.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    apply_prompt("Data directory", &mut cfg.data_dir)?;
    apply_prompt("Storage key for tickets", &mut cfg.storage_key)?;
    apply_prompt("Session lifetime in hours", &mut cfg.session_ttl_hours)?;
    apply_prompt("Log filter (e.g. info, ticketdesk=debug)", &mut cfg.log_filter)?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Data directory: {}", display_value(&cfg.data_dir));
    println!("Storage key: {}", display_value(&cfg.storage_key));
    println!("Session lifetime (hours): {}", display_value(&cfg.session_ttl_hours));
    println!("Log filter: {}", display_value(&cfg.log_filter));

    println!();
    match AppConfig::load() {
        Ok(effective) => {
            println!("Effective data directory: {}", effective.data_dir.display());
            println!("Effective storage key: {}", effective.storage_key);
            println!(
                "Effective session lifetime: {}h",
                effective.session_ttl.num_hours()
            );
        }
        Err(err) => println!("Effective configuration is invalid: {err}"),
    }

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>) -> AppResult<()> {
    let answer = prompt(field, target.as_deref())?;
    match interpret_answer(&answer) {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>) -> AppResult<String> {
    let mut stdout = io::stdout();

    match current {
        Some(value) => write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?,
        None => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input)
}

fn interpret_answer(input: &str) -> PromptAction {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        PromptAction::Keep
    } else if trimmed == "-" {
        PromptAction::Clear
    } else {
        PromptAction::Set(trimmed.to_string())
    }
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

#[derive(Debug, PartialEq, Eq)]
enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
