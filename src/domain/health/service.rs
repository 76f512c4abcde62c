use std::sync::OnceLock;
use std::time::Instant;

use super::dto::HealthStatus;

/// 서버 시작 시간 (전역)
static START_TIME: OnceLock<Instant> = OnceLock::new();

const HEALTH_MESSAGE: &str = "도사운세 서버가 정상 작동 중입니다";

/// 서버 시작 시간 초기화
///
/// main 함수에서 서버 시작 시 호출해야 합니다.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// 서버 가동 시간(초) 반환
pub fn get_uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

pub fn check_health(port: u16, api_key_configured: bool) -> HealthStatus {
    HealthStatus {
        status: "ok",
        message: HEALTH_MESSAGE,
        version: env!("CARGO_PKG_VERSION"),
        port,
        api_key_configured,
        uptime_secs: get_uptime_secs(),
    }
}
