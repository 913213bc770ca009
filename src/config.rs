//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Credits granted to a user the first time they are synced.
pub const DEFAULT_STARTING_CREDITS: i64 = 50;
/// Credits debited per committed analysis.
pub const DEFAULT_ANALYSIS_COST: i64 = 20;
/// Image references may be inline data URIs, so bodies can be large.
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Credits debited per analysis submission
    pub analysis_cost: i64,
    /// Balance given to newly synced users
    pub starting_credits: i64,
    /// Maximum accepted request body size
    pub max_body_bytes: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            database_path: PathBuf::from("data/hairlens.db"),
            frontend_url: "http://localhost:5173".to_string(),
            analysis_cost: DEFAULT_ANALYSIS_COST,
            starting_credits: DEFAULT_STARTING_CREDITS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self {
            port: parse_var("PORT", 8080)?,
            database_path: env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/hairlens.db")),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            analysis_cost: parse_var("ANALYSIS_COST", DEFAULT_ANALYSIS_COST)?,
            starting_credits: parse_var("STARTING_CREDITS", DEFAULT_STARTING_CREDITS)?,
            max_body_bytes: parse_var("MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        };

        if config.analysis_cost < 0 {
            return Err(ConfigError::Invalid("ANALYSIS_COST", "must not be negative"));
        }
        if config.starting_credits < 0 {
            return Err(ConfigError::Invalid(
                "STARTING_CREDITS",
                "must not be negative",
            ));
        }

        Ok(config)
    }
}

/// Read an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, "not a valid number")),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    Invalid(&'static str, &'static str),
}
