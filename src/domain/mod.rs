pub mod access_log;
pub mod account;
pub mod fortune;
pub mod health;
pub mod site;
