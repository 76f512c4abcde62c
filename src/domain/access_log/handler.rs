use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use tracing::info;

use super::dto::{AccessLogPage, DashboardResponse, LogFilterParams, SystemStatusResponse};
use super::export::{content_disposition, logs_to_xlsx, XLSX_CONTENT_TYPE};
use super::service::AccessLogService;
use crate::state::AppState;
use crate::utils::auth::AdminUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 관리자 대시보드 API
///
/// 전체/오늘/최근 7일 접속 수, 운세별·성별 통계, 최근 로그, 오늘 시간대별 접속 수를 반환합니다.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "조회 성공", body = SuccessDashboardResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<BaseResponse<DashboardResponse>>, AppError> {
    let result = AccessLogService::dashboard(&state.db, Utc::now().naive_utc()).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 접속 로그 조회 API
///
/// 운세 종류, 성별, 기간으로 필터링하며 최신순으로 50건씩 반환합니다.
#[utoipa::path(
    get,
    path = "/api/admin/logs",
    params(LogFilterParams),
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "조회 성공", body = SuccessAccessLogPageResponse),
        (status = 400, description = "잘못된 날짜 형식", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn list_logs(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<LogFilterParams>,
) -> Result<Json<BaseResponse<AccessLogPage>>, AppError> {
    let result = AccessLogService::list_logs(&state.db, params).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 접속 로그 다운로드 API
///
/// 조회 API와 같은 필터를 적용한 전체 로그를 엑셀 파일로 내려줍니다.
#[utoipa::path(
    get,
    path = "/api/admin/logs/export",
    params(LogFilterParams),
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "엑셀 파일", body = String,
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn export_logs(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(params): Query<LogFilterParams>,
) -> Result<Response, AppError> {
    let logs = AccessLogService::export_logs(&state.db, &params).await?;
    let body = logs_to_xlsx(&logs)?;
    let disposition = content_disposition(Utc::now().naive_utc());

    info!(admin = %admin.username(), count = logs.len(), "접속 로그 다운로드");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// 데이터베이스 통계 API
#[utoipa::path(
    get,
    path = "/api/admin/system",
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "조회 성공", body = SuccessSystemStatusResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn system_status(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<BaseResponse<SystemStatusResponse>>, AppError> {
    let result = AccessLogService::system_status(&state.db, Utc::now().naive_utc()).await?;

    Ok(Json(BaseResponse::success(result)))
}
