//! Process settings - listening port and store connection parameters.
//!
//! Settings are read from an optional `config.toml` in the working directory,
//! then overridden by the `PORT`, `DATABASE_URL`, and `MAX_CONNECTIONS`
//! environment variables. A missing file just means defaults, so a bare
//! `DATABASE_URL` in `.env` is enough to run.

use crate::errors::{Error, Result};
use serde::Deserialize;

/// Runtime settings shared by the API server and the loader binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// TCP port the HTTP server listens on
    pub port: u16,
    /// `SeaORM` connection URL; store host and credentials ride in here
    pub database_url: String,
    /// Upper bound on pooled store connections
    pub max_connections: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: "sqlite://data/sales_insights.sqlite?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

/// Loads settings from `./config.toml` (falling back to defaults when the
/// file is absent) and applies environment overrides.
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed, or if a
/// numeric environment override is not a number.
pub fn load() -> Result<Settings> {
    let mut settings = match std::fs::read_to_string("config.toml") {
        Ok(contents) => parse(&contents)?,
        Err(_) => Settings::default(),
    };
    apply_env_overrides(&mut settings)?;
    Ok(settings)
}

fn parse(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

fn apply_env_overrides(settings: &mut Settings) -> Result<()> {
    if let Ok(port) = std::env::var("PORT") {
        settings.port = port.parse().map_err(|_| Error::Config {
            message: format!("PORT must be a number, got `{port}`"),
        })?;
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database_url = url;
    }
    if let Ok(max) = std::env::var("MAX_CONNECTIONS") {
        settings.max_connections = max.parse().map_err(|_| Error::Config {
            message: format!("MAX_CONNECTIONS must be a number, got `{max}`"),
        })?;
    }
    Ok(())
}
