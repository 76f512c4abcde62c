use std::future::Future;
use std::net::SocketAddr;

use axum::http::{header::USER_AGENT, HeaderMap};
use sea_orm::DatabaseConnection;
use tracing::warn;

use super::dto::SajuRequest;
use crate::domain::access_log::{AccessLogService, AccessRecord, UsageRecord};
use crate::utils::error::AppError;

/// 저장하는 User-Agent 최대 길이
pub const USER_AGENT_MAX_CHARS: usize = 255;

/// 요청자 정보 (IP, User-Agent)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ClientMeta {
    /// 프록시 헤더를 먼저 보고, 없으면 소켓 주소를 씁니다.
    ///
    /// 순서: `X-Forwarded-For` 첫 항목 → `X-Real-IP` → 연결 주소
    pub fn from_request(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let ip_address = header("x-forwarded-for")
            .and_then(|forwarded| forwarded.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .or_else(|| header("x-real-ip"))
            .map(String::from)
            .or_else(|| peer.map(|addr| addr.ip().to_string()));

        let user_agent = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(|ua| ua.chars().take(USER_AGENT_MAX_CHARS).collect());

        Self {
            ip_address,
            user_agent,
        }
    }
}

/// 응답 경로를 막지 않는 부가 작업 실행
///
/// 실패는 warn 로그만 남기고 버립니다.
pub fn spawn_best_effort<F>(task: &'static str, fut: F)
where
    F: Future<Output = Result<(), AppError>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = fut.await {
            warn!(task = task, error = %e, "부가 작업 실패");
        }
    });
}

/// 접속 로그에 남길 값 (궁합은 첫 번째 사람 정보)
pub fn access_record(req: &SajuRequest, meta: ClientMeta) -> AccessRecord {
    let input = req.primary_input().cloned().unwrap_or_default();

    AccessRecord {
        fortune_type: req.category().to_string(),
        ip_address: meta.ip_address,
        user_agent: meta.user_agent,
        birth_date: input.birth_date,
        birth_time: input.birth_time,
        gender: input.gender,
        calendar_type: input.calendar_type,
    }
}

/// 접속 로그와 사용량을 백그라운드로 저장합니다.
pub fn record_success(db: &DatabaseConnection, access: AccessRecord, usage: UsageRecord) {
    let usage_db = db.clone();
    spawn_best_effort("api_usage", async move {
        AccessLogService::record_usage(&usage_db, usage).await
    });

    let access_db = db.clone();
    spawn_best_effort("access_log", async move {
        AccessLogService::record_access(&access_db, access).await
    });
}
