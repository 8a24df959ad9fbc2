use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::infra::session::SESSION_KEY;
use crate::repository::DEFAULT_TICKETS_KEY;
use crate::workflow::access::RETURN_TO_KEY;

const APP_DIR_NAME: &str = "ticketdesk";
const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

pub const CONFIG_DIR_ENV: &str = "TICKETDESK_CONFIG_DIR";
pub const DATA_DIR_ENV: &str = "TICKETDESK_DATA_DIR";
pub const STORAGE_KEY_ENV: &str = "TICKETDESK_STORAGE_KEY";
pub const SESSION_TTL_ENV: &str = "TICKETDESK_SESSION_TTL_HOURS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub session_ttl: Duration,
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let stored = StoredConfig::load()?;
        let default_data_dir = dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME));
        Self::resolve(stored, |name| env::var(name).ok(), default_data_dir)
    }

    /// Environment beats the stored file, which beats built-in defaults.
    pub fn resolve(
        stored: StoredConfig,
        env: impl Fn(&str) -> Option<String>,
        default_data_dir: Option<PathBuf>,
    ) -> AppResult<Self> {
        let pick = |name: &str, stored: Option<String>| {
            env(name)
                .or(stored)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let data_dir = pick(DATA_DIR_ENV, stored.data_dir)
            .map(PathBuf::from)
            .or(default_data_dir)
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "could not determine a data directory; set {DATA_DIR_ENV}"
                ))
            })?;

        let storage_key =
            pick(STORAGE_KEY_ENV, stored.storage_key).unwrap_or_else(|| DEFAULT_TICKETS_KEY.to_string());
        if [SESSION_KEY, RETURN_TO_KEY].contains(&storage_key.as_str()) {
            return Err(AppError::Configuration(format!(
                "storage key '{storage_key}' is reserved; pick another name for the ticket data"
            )));
        }

        let session_ttl = match pick(SESSION_TTL_ENV, stored.session_ttl_hours) {
            Some(raw) => parse_ttl_hours(&raw)?,
            None => Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        };

        Ok(Self {
            data_dir,
            storage_key,
            session_ttl,
            log_filter: stored.log_filter.filter(|value| !value.trim().is_empty()),
        })
    }
}

fn parse_ttl_hours(raw: &str) -> AppResult<Duration> {
    match raw.parse::<i64>() {
        Ok(hours) if hours > 0 => Ok(Duration::hours(hours)),
        _ => Err(AppError::Configuration(format!(
            "session TTL must be a positive number of hours, got '{raw}'"
        ))),
    }
}

/// The on-disk config file. Every field is optional; unset fields fall back
/// to the environment or defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_ttl_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn parse(contents: &str) -> AppResult<Self> {
        serde_json::from_str(contents)
            .map_err(|err| AppError::Configuration(format!("invalid config file: {err}")))
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to write config: {err}")))?;
        fs::write(&path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "could not determine a config directory; set {CONFIG_DIR_ENV}"
            ))
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
