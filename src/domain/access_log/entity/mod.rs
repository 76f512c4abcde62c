pub mod access_log;
pub mod api_usage;
