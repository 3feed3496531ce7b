//! Environment-based configuration.
//!
//! Everything the bot needs comes from environment variables (a `.env`
//! file is honored via `dotenvy` in `main`). Only `TELEGRAM_TOKEN` is
//! strictly required; missing optional credentials degrade the relevant
//! feature with a startup warning instead of failing.

use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Default polling cadence in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Default number of transactions fetched per feed per poll.
pub const DEFAULT_MAX_TX_FETCH: usize = 12;

/// Default SQLite database path.
pub const DEFAULT_DB_PATH: &str = "tracker.sqlite3";

/// Runtime configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot API token obtained from BotFather. Required.
    pub telegram_token: String,
    /// Etherscan API key; `None` degrades feeds to always-empty.
    pub etherscan_api_key: Option<String>,
    /// Fireworks API key; `None` disables transaction summaries.
    pub fireworks_api_key: Option<String>,
    /// Delay between poll cycles.
    pub poll_interval: Duration,
    /// Maximum transactions fetched per feed per poll.
    pub max_tx_fetch: usize,
    /// SQLite database path.
    pub db_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if `TELEGRAM_TOKEN` is absent or a
    /// numeric variable fails to parse.
    pub fn from_env() -> Result<Self> {
        let telegram_token = require_var("TELEGRAM_TOKEN")?;

        let poll_interval_secs =
            parse_var("POLL_INTERVAL", DEFAULT_POLL_INTERVAL_SECS)?;
        let max_tx_fetch = parse_var("MAX_TX_FETCH", DEFAULT_MAX_TX_FETCH)?;

        Ok(Self {
            telegram_token,
            etherscan_api_key: non_empty_var("ETHERSCAN_API_KEY"),
            fireworks_api_key: non_empty_var("FIREWORKS_API_KEY"),
            poll_interval: Duration::from_secs(poll_interval_secs),
            max_tx_fetch,
            db_path: non_empty_var("DB_PATH")
                .unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
        })
    }

    /// Initialize the tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence; the default level is `info`.
    pub fn init_logging(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt().with_env_filter(filter).init();
    }
}

fn require_var(field: &'static str) -> Result<String> {
    non_empty_var(field)
        .ok_or_else(|| ConfigError::MissingField { field }.into())
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(field: &'static str, default: T) -> Result<T> {
    match std::env::var(field) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            ConfigError::InvalidValue {
                field,
                reason: format!("`{raw}` is not a number"),
            }
            .into()
        }),
        Err(_) => Ok(default),
    }
}
