pub mod dto;
pub mod entity;
pub mod export;
pub mod handler;
pub mod service;

pub use service::{AccessLogService, AccessRecord, UsageRecord};
