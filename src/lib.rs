pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use domain::{access_log, account, fortune, health, site};
use global::{request_id_middleware, with_rate_limit};
pub use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        fortune::handler::saju,
        health::handler::health_check,
        site::handler::public_settings,
        account::handler::login,
        account::handler::logout,
        account::handler::list_admins,
        account::handler::create_admin,
        account::handler::delete_admin,
        account::handler::change_password,
        access_log::handler::dashboard,
        access_log::handler::list_logs,
        access_log::handler::export_logs,
        access_log::handler::system_status,
        site::handler::list_settings,
        site::handler::update_settings,
        site::handler::list_categories,
        site::handler::create_category,
        site::handler::update_category,
        site::handler::delete_category,
        site::handler::list_notices,
        site::handler::create_notice,
        site::handler::update_notice,
        site::handler::delete_notice,
    ),
    components(
        schemas(
            fortune::dto::BirthInput,
            fortune::dto::SajuRequest,
            fortune::dto::SajuResponse,
            fortune::dto::SajuErrorResponse,
            health::dto::HealthStatus,
            account::dto::LoginRequest,
            account::dto::LoginResponse,
            account::dto::SuccessLoginResponse,
            account::dto::AdminItem,
            account::dto::SuccessAdminListResponse,
            account::dto::CreateAdminRequest,
            account::dto::SuccessAdminResponse,
            account::dto::ChangePasswordRequest,
            access_log::dto::AccessLogItem,
            access_log::dto::AccessLogPage,
            access_log::dto::SuccessAccessLogPageResponse,
            access_log::dto::CountStat,
            access_log::dto::HourlyStat,
            access_log::dto::DailyStat,
            access_log::dto::DashboardResponse,
            access_log::dto::SuccessDashboardResponse,
            access_log::dto::SystemStatusResponse,
            access_log::dto::SuccessSystemStatusResponse,
            site::dto::PublicSettingsResponse,
            site::dto::SettingItem,
            site::dto::SuccessSettingListResponse,
            site::dto::UpdateSettingsRequest,
            site::dto::CategoryItem,
            site::dto::SuccessCategoryListResponse,
            site::dto::SuccessCategoryResponse,
            site::dto::CreateCategoryRequest,
            site::dto::UpdateCategoryRequest,
            site::dto::NoticeItem,
            site::dto::SuccessNoticeListResponse,
            site::dto::SuccessNoticeResponse,
            site::dto::NoticeRequest,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Fortune", description = "사주 풀이 API"),
        (name = "Site", description = "공개 사이트 설정 API"),
        (name = "Admin", description = "관리자 API (세션 쿠키 인증)"),
        (name = "Health", description = "서버 상태 확인 API")
    )
)]
pub struct ApiDoc;

/// 애플리케이션 라우터 구성
///
/// 정적 파일은 `STATIC_DIR`에서 fallback으로 제공합니다.
pub fn create_router(state: AppState) -> Router {
    let fortune_routes = Router::new().route("/api/saju", post(fortune::handler::saju));
    let fortune_routes = if state.config.rate_limit_enabled {
        with_rate_limit(fortune_routes)
    } else {
        fortune_routes
    };

    let admin_routes = Router::new()
        .route("/api/admin/login", post(account::handler::login))
        .route("/api/admin/logout", post(account::handler::logout))
        .route("/api/admin/dashboard", get(access_log::handler::dashboard))
        .route("/api/admin/logs", get(access_log::handler::list_logs))
        .route("/api/admin/logs/export", get(access_log::handler::export_logs))
        .route("/api/admin/system", get(access_log::handler::system_status))
        .route(
            "/api/admin/settings",
            get(site::handler::list_settings).put(site::handler::update_settings),
        )
        .route(
            "/api/admin/categories",
            get(site::handler::list_categories).post(site::handler::create_category),
        )
        .route(
            "/api/admin/categories/:category_id",
            put(site::handler::update_category).delete(site::handler::delete_category),
        )
        .route(
            "/api/admin/notices",
            get(site::handler::list_notices).post(site::handler::create_notice),
        )
        .route(
            "/api/admin/notices/:notice_id",
            put(site::handler::update_notice).delete(site::handler::delete_notice),
        )
        .route(
            "/api/admin/accounts",
            get(account::handler::list_admins).post(account::handler::create_admin),
        )
        .route(
            "/api/admin/accounts/password",
            put(account::handler::change_password),
        )
        .route(
            "/api/admin/accounts/:admin_id",
            delete(account::handler::delete_admin),
        );

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .route("/api/settings", get(site::handler::public_settings))
        .merge(fortune_routes)
        .merge(admin_routes)
        .fallback_service(static_files)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
