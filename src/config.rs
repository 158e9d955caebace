use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};
use url::Url;

use crate::errors::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Explicit configuration handed to the client and controllers.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin; the survey collection lives at `{api_url}/api/surveys`.
    pub api_url: Url,
    /// Pause between a successful update and returning to the list.
    pub update_redirect_delay: Duration,
    /// Pause between a successful create and clearing the form.
    pub create_reset_delay: Duration,
}

impl Config {
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_url(api_url)?,
            update_redirect_delay: Duration::from_millis(2000),
            create_reset_delay: Duration::from_millis(3000),
        })
    }

    /// Read the environment, falling back to defaults for unset keys.
    pub fn load() -> Result<Self, ConfigError> {
        let api_url: String = try_load("SURVEY_API_URL", DEFAULT_API_URL)?;
        let update_ms: u64 = try_load("SURVEY_UPDATE_REDIRECT_MS", "2000")?;
        let create_ms: u64 = try_load("SURVEY_CREATE_RESET_MS", "3000")?;

        Ok(Self {
            api_url: parse_url(&api_url)?,
            update_redirect_delay: Duration::from_millis(update_ms),
            create_reset_delay: Duration::from_millis(create_ms),
        })
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key: "SURVEY_API_URL",
        value: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            key: "SURVEY_API_URL",
            value: raw.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}
