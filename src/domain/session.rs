use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub token: String,
    pub user_email: String,
    pub issued_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.issued_at > ttl
    }
}

/// Login/signup input that passed the form checks. The password is only
/// checked for length; it is never stored.
#[derive(Debug, Clone)]
pub struct Credentials {
    email: String,
}

impl Credentials {
    pub fn parse(email: &str, password: &str) -> AppResult<Self> {
        let email = email.trim();
        if !is_plausible_email(email) {
            return Err(AppError::Credentials("Enter a valid email".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::Credentials(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        Ok(Self {
            email: email.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

// local@domain.tld, no whitespace, a single '@'.
fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
