//! Domain types and configuration shared by the scraper and the CLI.

pub mod app_config;
pub mod config;
pub mod listings;
pub mod query;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use listings::{ListingRecord, ResultSet};
pub use query::{MatchMode, QueryError, SearchQuery, DEFAULT_FUZZY_THRESHOLD};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
