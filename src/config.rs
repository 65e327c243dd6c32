//! Client configuration loaded from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BOARD_API_URL` | `http://localhost:8080` | Base URL of the board API |
//! | `BOARD_API_TIMEOUT_MS` | `10000` | Total timeout of a single request |
//! | `BOARD_STORE_BUFFER` | `32` | Mailbox capacity of each store |
//!
//! A `.env` file in the working directory is loaded first, if present.

use std::env;
use std::time::Duration;
use thiserror::Error;

pub const API_URL_VAR: &str = "BOARD_API_URL";
pub const TIMEOUT_VAR: &str = "BOARD_API_TIMEOUT_MS";
pub const BUFFER_VAR: &str = "BOARD_STORE_BUFFER";

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            buffer_size: DEFAULT_BUFFER,
        }
    }
}

impl ClientConfig {
    /// Loads `.env` (if any), then reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(invalid(API_URL_VAR, url));
            }
            config.base_url = url.to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let millis = parse_positive::<u64>(TIMEOUT_VAR, &raw)?;
            config.timeout = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(BUFFER_VAR) {
            config.buffer_size = parse_positive::<usize>(BUFFER_VAR, &raw)?;
        }

        Ok(config)
    }
}

fn parse_positive<N>(var: &'static str, raw: &str) -> Result<N, ConfigError>
where
    N: std::str::FromStr + PartialOrd + Default,
{
    match raw.trim().parse::<N>() {
        Ok(n) if n > N::default() => Ok(n),
        _ => Err(invalid(var, raw)),
    }
}

fn invalid(var: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
    }
}
