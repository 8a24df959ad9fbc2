use std::env;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

pub const LOG_ENV_VAR: &str = "TICKETDESK_LOG";

/// Installs the stderr subscriber. `TICKETDESK_LOG` wins over the configured
/// filter, which wins over the `-v` count.
pub fn init(verbosity: u8, configured_filter: Option<&str>) {
    let builder = EnvFilter::builder().with_default_directive(level_from_verbosity(verbosity).into());
    let filter = match configured_filter {
        Some(directives) if env::var_os(LOG_ENV_VAR).is_none() => builder.parse_lossy(directives),
        _ => builder.with_env_var(LOG_ENV_VAR).from_env_lossy(),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
