//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `MENTOR_SCHEDULER` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use mentor_scheduler::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod mentors;
mod scheduling;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use mentors::MentorsConfig;
pub use scheduling::SchedulingConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MENTOR_SCHEDULER";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL connection; in-memory stores when absent
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    #[serde(default)]
    pub scheduling: SchedulingConfig,

    /// Mentor seed for the in-memory directory; required without a database
    #[serde(default)]
    pub mentors: MentorsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `.env` if present, then every `MENTOR_SCHEDULER__*` variable:
    ///
    /// - `MENTOR_SCHEDULER__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MENTOR_SCHEDULER__DATABASE__URL=...` -> `database.url = ...`
    /// - `MENTOR_SCHEDULER__SCHEDULING__AMBIGUOUS_TIME=latest`
    /// - `MENTOR_SCHEDULER__MENTORS__SEED_FILE=./mentors.json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        match &self.database {
            Some(database) => database.validate()?,
            None if self.mentors.seed_file.is_none() => {
                return Err(ValidationError::MissingRequired(
                    "mentors.seed_file (no database configured)",
                ));
            }
            None => {}
        }
        self.scheduling.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
