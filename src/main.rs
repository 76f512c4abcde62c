use std::net::SocketAddr;

use dosa_server::{
    config::{establish_connection, AppConfig},
    create_router,
    domain::{account::AccountService, fortune::build_client, health::init_start_time},
    global::shutdown_signal,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 종료 시까지 유지)
    let _log_guard = dosa_server::utils::logging::init_logging();
    init_start_time();

    // 3. 설정 및 DB 연결
    let config = AppConfig::from_env()?;
    let db = establish_connection(&config.database_url, config.schema_sync).await?;
    AccountService::ensure_default_admin(&db, &config.default_admin).await?;

    // 4. 생성 클라이언트 (API 키가 없으면 비활성)
    let ai_client = build_client(&config.openai);
    tracing::info!(
        model = %config.openai.model,
        api_key_configured = ai_client.is_configured(),
        rate_limit_enabled = config.rate_limit_enabled,
        "생성 클라이언트 준비 완료"
    );

    // 5. 라우터 설정
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let app = create_router(AppState {
        db,
        config,
        ai_client,
    });

    // 6. 서버 실행
    tracing::info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}
