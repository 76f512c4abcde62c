use axum::{
    extract::{Path, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use super::dto::{
    AdminItem, ChangePasswordRequest, CreateAdminRequest, LoginRequest, LoginResponse,
};
use super::service::AccountService;
use crate::state::AppState;
use crate::utils::auth::AdminUser;
use crate::utils::cookie::{clear_session_cookie, create_session_cookie};
use crate::utils::error::AppError;
use crate::utils::jwt::encode_session_token;
use crate::utils::BaseResponse;

/// 관리자 로그인 API
///
/// 성공 시 세션 토큰을 `admin_session` 쿠키로 설정합니다.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = SuccessLoginResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "아이디 또는 비밀번호 불일치", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    req.validate()?;

    let admin = AccountService::authenticate(&state.db, &req).await?;

    let ttl = state.config.session_ttl_seconds;
    let token = encode_session_token(admin.id, &admin.username, &state.config.session_secret, ttl)?;
    let cookie = create_session_cookie(&token, ttl)?;

    let body = BaseResponse::success_with_message(
        LoginResponse {
            admin_id: admin.id,
            username: admin.username,
            expires_in: ttl,
        },
        "로그인되었습니다.",
    );

    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// 관리자 로그아웃 API
#[utoipa::path(
    post,
    path = "/api/admin/logout",
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "로그아웃 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn logout(admin: AdminUser) -> Result<Response, AppError> {
    let cookie = clear_session_cookie()?;

    tracing::info!(username = %admin.username(), "관리자 로그아웃");

    let body = BaseResponse::success_with_message((), "로그아웃되었습니다.");
    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// 관리자 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/admin/accounts",
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "조회 성공", body = SuccessAdminListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn list_admins(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<BaseResponse<Vec<AdminItem>>>, AppError> {
    let result = AccountService::list_admins(&state.db).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 관리자 추가 API
#[utoipa::path(
    post,
    path = "/api/admin/accounts",
    request_body = CreateAdminRequest,
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "추가 성공", body = SuccessAdminResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 409, description = "아이디 또는 이메일 중복", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn create_admin(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<CreateAdminRequest>,
) -> Result<Json<BaseResponse<AdminItem>>, AppError> {
    req.validate()?;

    let result = AccountService::create_admin(&state.db, req, admin.username()).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "새 관리자 계정이 추가되었습니다.",
    )))
}

/// 관리자 삭제 API
#[utoipa::path(
    delete,
    path = "/api/admin/accounts/{admin_id}",
    params(("admin_id" = i32, Path, description = "삭제할 관리자 ID")),
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 400, description = "자기 자신 삭제 시도", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 관리자", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn delete_admin(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(admin_id): Path<i32>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    AccountService::delete_admin(&state.db, admin_id, admin.admin_id()?).await?;

    Ok(Json(BaseResponse::success_with_message(
        (),
        "관리자 계정이 삭제되었습니다.",
    )))
}

/// 비밀번호 변경 API
#[utoipa::path(
    put,
    path = "/api/admin/accounts/password",
    request_body = ChangePasswordRequest,
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "변경 성공"),
        (status = 400, description = "비밀번호 규칙 위반", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn change_password(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    AccountService::change_password(&state.db, admin.admin_id()?, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        (),
        "비밀번호가 변경되었습니다.",
    )))
}
