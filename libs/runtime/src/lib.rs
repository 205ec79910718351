//! Process-level plumbing for the chore chart server: layered configuration,
//! home directory resolution, logging setup and database connection.

pub mod config;
pub mod db;
pub mod logging;
pub mod paths;

pub use config::{
    default_logging_config, AppConfig, AppConfigProvider, CliArgs, DatabaseConfig, LoggingConfig,
    Section, ServerConfig,
};
pub use db::{absolutize_sqlite_dsn, connect_database, detect_backend, DbBackend};
