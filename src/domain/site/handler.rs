use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::dto::{
    CategoryItem, CreateCategoryRequest, NoticeItem, NoticeRequest, PublicSettingsResponse,
    SettingItem, UpdateCategoryRequest, UpdateSettingsRequest,
};
use super::service::SiteService;
use crate::state::AppState;
use crate::utils::auth::AdminUser;
use crate::utils::error::AppError;
use crate::utils::BaseResponse;

/// 공개 사이트 설정 조회 API
///
/// 프론트엔드 헤더/푸터 구성에 쓰이며, 저장되지 않은 항목은 기본값으로 채웁니다.
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "조회 성공", body = PublicSettingsResponse),
        (status = 500, description = "서버 에러", body = ErrorResponse)
    ),
    tag = "Site"
)]
pub async fn public_settings(
    State(state): State<AppState>,
) -> Result<Json<PublicSettingsResponse>, AppError> {
    let settings = SiteService::public_settings(&state.db).await?;

    Ok(Json(PublicSettingsResponse {
        success: true,
        settings,
    }))
}

/// 사이트 설정 목록 API
#[utoipa::path(
    get,
    path = "/api/admin/settings",
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "조회 성공", body = SuccessSettingListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn list_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<BaseResponse<Vec<SettingItem>>>, AppError> {
    let result = SiteService::list_settings(&state.db).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 사이트 설정 저장 API
#[utoipa::path(
    put,
    path = "/api/admin/settings",
    request_body = UpdateSettingsRequest,
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "저장 성공", body = SuccessSettingListResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn update_settings(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<BaseResponse<Vec<SettingItem>>>, AppError> {
    let result = SiteService::update_settings(&state.db, req.settings, admin.username()).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "설정이 저장되었습니다.",
    )))
}

/// 운세 카테고리 목록 API
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "조회 성공", body = SuccessCategoryListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<BaseResponse<Vec<CategoryItem>>>, AppError> {
    let result = SiteService::list_categories(&state.db).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 운세 카테고리 추가 API
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryRequest,
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "추가 성공", body = SuccessCategoryResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 409, description = "카테고리 키 중복", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn create_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<BaseResponse<CategoryItem>>, AppError> {
    req.validate()?;

    let result = SiteService::create_category(&state.db, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "카테고리가 추가되었습니다.",
    )))
}

/// 운세 카테고리 수정 API
#[utoipa::path(
    put,
    path = "/api/admin/categories/{category_id}",
    params(("category_id" = i32, Path, description = "카테고리 ID")),
    request_body = UpdateCategoryRequest,
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "수정 성공", body = SuccessCategoryResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 카테고리", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn update_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(category_id): Path<i32>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<BaseResponse<CategoryItem>>, AppError> {
    req.validate()?;

    let result = SiteService::update_category(&state.db, category_id, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "카테고리가 수정되었습니다.",
    )))
}

/// 운세 카테고리 삭제 API
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{category_id}",
    params(("category_id" = i32, Path, description = "카테고리 ID")),
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 카테고리", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(category_id): Path<i32>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    SiteService::delete_category(&state.db, category_id).await?;

    Ok(Json(BaseResponse::success_with_message(
        (),
        "카테고리가 삭제되었습니다.",
    )))
}

/// 공지사항 목록 API
#[utoipa::path(
    get,
    path = "/api/admin/notices",
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "조회 성공", body = SuccessNoticeListResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn list_notices(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<BaseResponse<Vec<NoticeItem>>>, AppError> {
    let result = SiteService::list_notices(&state.db).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 공지사항 추가 API
#[utoipa::path(
    post,
    path = "/api/admin/notices",
    request_body = NoticeRequest,
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "추가 성공", body = SuccessNoticeResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn create_notice(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<NoticeRequest>,
) -> Result<Json<BaseResponse<NoticeItem>>, AppError> {
    req.validate()?;

    let result = SiteService::create_notice(&state.db, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "공지사항이 추가되었습니다.",
    )))
}

/// 공지사항 수정 API
#[utoipa::path(
    put,
    path = "/api/admin/notices/{notice_id}",
    params(("notice_id" = i32, Path, description = "공지사항 ID")),
    request_body = NoticeRequest,
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "수정 성공", body = SuccessNoticeResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 공지사항", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn update_notice(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(notice_id): Path<i32>,
    Json(req): Json<NoticeRequest>,
) -> Result<Json<BaseResponse<NoticeItem>>, AppError> {
    req.validate()?;

    let result = SiteService::update_notice(&state.db, notice_id, req).await?;

    Ok(Json(BaseResponse::success_with_message(
        result,
        "공지사항이 수정되었습니다.",
    )))
}

/// 공지사항 삭제 API
#[utoipa::path(
    delete,
    path = "/api/admin/notices/{notice_id}",
    params(("notice_id" = i32, Path, description = "공지사항 ID")),
    security(("admin_session" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 공지사항", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn delete_notice(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(notice_id): Path<i32>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    SiteService::delete_notice(&state.db, notice_id).await?;

    Ok(Json(BaseResponse::success_with_message(
        (),
        "공지사항이 삭제되었습니다.",
    )))
}
