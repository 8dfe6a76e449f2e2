//! Environment variable handling.

use std::env;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    // Configuration
    pub const POLO_CONFIG_PATH: &str = "POLO_CONFIG_PATH";
    pub const POLO_ENV: &str = "POLO_ENV";

    // Logging
    pub const POLO_LOG_LEVEL: &str = "POLO_LOG_LEVEL";
    pub const POLO_LOG_FORMAT: &str = "POLO_LOG_FORMAT";
    pub const POLO_LOG_FILE: &str = "POLO_LOG_FILE";
    pub const POLO_LOG_SOURCE: &str = "POLO_LOG_SOURCE";
    pub const POLO_LOG_SPANS: &str = "POLO_LOG_SPANS";

    // Development
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Environment configuration.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Initialize environment from .env files.
    ///
    /// `.env`, `.env.local` and `.env.<POLO_ENV>` are read in that order,
    /// later files overriding earlier ones. Missing files are skipped.
    pub fn init() -> Result<Self, EnvError> {
        load_optional(".env")?;
        load_optional(".env.local")?;

        if let Ok(name) = env::var(vars::POLO_ENV) {
            load_optional(&format!(".env.{name}"))?;
        }

        Ok(Self { _guard: () })
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok()
    }
}

fn load_optional(file: &str) -> Result<(), EnvError> {
    match dotenvy::from_filename_override(file) {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.into()),
    }
}
