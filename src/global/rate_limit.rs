//! Rate Limiting 모듈
//!
//! IP 기반 요청 제한으로 생성 API 대량 호출을 막습니다.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorError,
    GovernorLayer,
};

use crate::utils::ErrorResponse;

/// Rate Limiter 설정 상수
mod config {
    /// 초당 보충되는 요청 수
    pub const REQUESTS_PER_SECOND: u64 = 10;
    /// 버스트 허용량 (순간 최대 요청 수)
    pub const BURST_SIZE: u32 = 50;
}

pub const RATE_LIMIT_MESSAGE: &str = "요청이 너무 많습니다. 잠시 후 다시 시도해주세요.";

/// 라우터에 IP 기반 Rate Limiter를 적용합니다.
///
/// - 초당 10 요청 보충, 버스트 50
/// - `X-Forwarded-For`, `X-Real-IP`, 연결 주소 순으로 IP 판별
pub fn with_rate_limit<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let built = GovernorConfigBuilder::default()
        .per_second(config::REQUESTS_PER_SECOND)
        .burst_size(config::BURST_SIZE)
        .key_extractor(SmartIpKeyExtractor)
        .error_handler(|err| RateLimitResponse::from(err).into_response())
        .finish();

    match built {
        Some(governor_config) => router.layer(GovernorLayer {
            config: Arc::new(governor_config),
        }),
        None => {
            tracing::error!("Rate limiter 설정이 잘못되어 적용하지 않습니다");
            router
        }
    }
}

/// Rate Limit 초과 시 응답
#[derive(Debug)]
struct RateLimitResponse {
    status: StatusCode,
    retry_after: Option<u64>,
}

impl From<GovernorError> for RateLimitResponse {
    fn from(err: GovernorError) -> Self {
        match err {
            GovernorError::TooManyRequests { wait_time, .. } => Self {
                status: StatusCode::TOO_MANY_REQUESTS,
                retry_after: Some(wait_time),
            },
            _ => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                retry_after: None,
            },
        }
    }
}

impl IntoResponse for RateLimitResponse {
    fn into_response(self) -> Response {
        let body = if self.status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(retry_after_secs = ?self.retry_after, "Rate limit exceeded");
            ErrorResponse::new("RATE_LIMIT", RATE_LIMIT_MESSAGE)
        } else {
            tracing::error!(status = %self.status, "Rate limiter 처리 실패");
            ErrorResponse::new("COMMON500", "요청자 IP를 확인할 수 없습니다.")
        };

        let mut response = (self.status, Json(body)).into_response();

        if let Some(retry_after) = self.retry_after {
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
        }

        response
    }
}
