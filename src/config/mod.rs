/// Database connection and schema bootstrap
pub mod database;

/// Process settings from config.toml and environment variables
pub mod settings;
