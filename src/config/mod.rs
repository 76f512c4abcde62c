pub mod app_config;
pub mod database;

pub use app_config::{AppConfig, ConfigError, DefaultAdmin, OpenAiSettings};
pub use database::{establish_connection, sync_schema};
