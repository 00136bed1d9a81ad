//! Process configuration read from `ELEGANTE_*` environment variables.

use anyhow::{Context, Result, anyhow};
use chrono::FixedOffset;

use elegante_inventory::DEFAULT_UTC_OFFSET_SECS;
use elegante_observability::ObservabilityConfig;

pub const LOGIN_EMAIL: &str = "ELEGANTE_LOGIN_EMAIL";
pub const LOGIN_PASSWORD: &str = "ELEGANTE_LOGIN_PASSWORD";
pub const UTC_OFFSET_HOURS: &str = "ELEGANTE_UTC_OFFSET_HOURS";
pub const LOG_JSON: &str = "ELEGANTE_LOG_JSON";
pub const INCLUDE_REPORT: &str = "ELEGANTE_INCLUDE_REPORT";

const DEV_EMAIL: &str = "admin@gentselegante.com";
const DEV_PASSWORD: &str = "admin123";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub login_email: String,
    pub login_password: String,
    /// True when no credentials were configured and the demo owner is used.
    pub demo_login: bool,
    pub timezone: FixedOffset,
    pub include_report: bool,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (login_email, login_password, demo_login) =
            match (lookup(LOGIN_EMAIL), lookup(LOGIN_PASSWORD)) {
                (Some(email), Some(password)) => (email, password, false),
                _ => (DEV_EMAIL.to_string(), DEV_PASSWORD.to_string(), true),
            };

        let offset_secs = match lookup(UTC_OFFSET_HOURS) {
            Some(raw) => {
                let hours: i32 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{UTC_OFFSET_HOURS} must be an integer, got {raw:?}"))?;
                hours * 3600
            }
            None => DEFAULT_UTC_OFFSET_SECS,
        };
        let timezone = FixedOffset::east_opt(offset_secs)
            .ok_or_else(|| anyhow!("{UTC_OFFSET_HOURS} out of range"))?;

        let observability = ObservabilityConfig {
            json: flag(&lookup, LOG_JSON, true)?,
            ..ObservabilityConfig::default()
        };

        Ok(Self {
            login_email,
            login_password,
            demo_login,
            timezone,
            include_report: flag(&lookup, INCLUDE_REPORT, false)?,
            observability,
        })
    }
}

fn flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None => Ok(default),
        Some("1" | "true" | "yes") => Ok(true),
        Some("0" | "false" | "no") => Ok(false),
        Some(other) => Err(anyhow!("{key} must be a boolean, got {other:?}")),
    }
}
