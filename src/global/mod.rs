pub mod middleware;
pub mod rate_limit;
pub mod shutdown;

pub use middleware::request_id_middleware;
pub use rate_limit::with_rate_limit;
pub use shutdown::shutdown_signal;
