use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use dosa_server::{
    config::{establish_connection, AppConfig, DefaultAdmin, OpenAiSettings},
    create_router,
    domain::access_log::entity::{access_log, api_usage},
    domain::fortune::{build_client, prompt::PromptSpec, AiClient, AiClientTrait, Generation},
    utils::error::AppError,
    AppState,
};
use http_body_util::BodyExt;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use tower::ServiceExt;

const SAJU_URI: &str = "/api/saju";

// ===== Helper Functions =====

type SeenPrompts = Arc<Mutex<Vec<PromptSpec>>>;

/// 호출된 프롬프트를 기록하고 정해진 결과를 돌려주는 생성 클라이언트
struct StubClient {
    reply: Result<Generation, String>,
    seen: SeenPrompts,
}

#[async_trait]
impl AiClientTrait for StubClient {
    async fn generate(&self, spec: &PromptSpec) -> Result<Generation, AppError> {
        self.seen.lock().unwrap().push(spec.clone());
        self.reply.clone().map_err(AppError::GenerationFailed)
    }

    fn is_configured(&self) -> bool {
        true
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server_port: 2222,
        database_url: "sqlite::memory:".to_string(),
        schema_sync: true,
        session_secret: "test-secret-key".to_string(),
        session_ttl_seconds: 3600,
        default_admin: DefaultAdmin {
            username: "admin".to_string(),
            email: "admin@dosa.com".to_string(),
            password: "admin1234".to_string(),
        },
        openai: OpenAiSettings {
            api_key: None,
            timeout_seconds: 30,
            model: "gpt-3.5-turbo".to_string(),
        },
        rate_limit_enabled: false,
        static_dir: "static".to_string(),
    }
}

async fn setup_with(ai_client: AiClient) -> (Router, DatabaseConnection) {
    let config = test_config();
    let db = establish_connection(&config.database_url, true).await.unwrap();
    let app = create_router(AppState {
        db: db.clone(),
        config,
        ai_client,
    });
    (app, db)
}

async fn setup(reply: Result<Generation, String>) -> (Router, DatabaseConnection, SeenPrompts) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let client = StubClient {
        reply,
        seen: seen.clone(),
    };
    let (app, db) = setup_with(Arc::new(client)).await;
    (app, db, seen)
}

fn generated(text: &str) -> Result<Generation, String> {
    Ok(Generation {
        text: text.to_string(),
        tokens_used: 1000,
    })
}

fn create_json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
        .header("User-Agent", "integration-test")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn parse_response_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// 백그라운드 기록이 끝날 때까지 잠시 기다립니다.
async fn wait_for_rows(db: &DatabaseConnection) -> (u64, u64) {
    for _ in 0..50 {
        let logs = access_log::Entity::find().count(db).await.unwrap();
        let usage = api_usage::Entity::find().count(db).await.unwrap();
        if logs > 0 && usage > 0 {
            return (logs, usage);
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    (
        access_log::Entity::find().count(db).await.unwrap(),
        api_usage::Entity::find().count(db).await.unwrap(),
    )
}

// ===== Saju API Tests =====

mod saju_api {
    use super::*;

    #[tokio::test]
    async fn should_return_generated_text_for_today() {
        // Arrange
        let (app, _db, seen) = setup(generated("오늘은 좋은 날입니다")).await;
        let request = create_json_request(
            SAJU_URI,
            json!({
                "category": "오늘의 운세",
                "birthDate": "1990-01-01",
                "calendarType": "solar",
                "gender": "male"
            }),
        );

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["result"], "오늘은 좋은 날입니다");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].token_budget, 1500);
        assert!(seen[0].user_instruction.contains("생년월일: 1990-01-01 (양력)"));
        assert!(seen[0].user_instruction.contains("성별: 남성"));
    }

    #[tokio::test]
    async fn should_convert_lunar_birth_date() {
        let (app, _db, seen) = setup(generated("풀이")).await;
        let request = create_json_request(
            SAJU_URI,
            json!({
                "category": "평생 운세",
                "birthDate": "2000-03-01",
                "calendarType": "lunar"
            }),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let seen = seen.lock().unwrap();
        assert!(seen[0].user_instruction.contains("2000-04-05"));
        assert!(seen[0].user_instruction.contains("[원래 음력: 2000-03-01]"));
        assert!(seen[0].user_instruction.contains("출생시간: 모름"));
    }

    #[tokio::test]
    async fn should_record_access_log_and_usage() {
        let (app, db, _seen) = setup(generated("풀이")).await;
        let request = create_json_request(
            SAJU_URI,
            json!({ "category": "재물운", "birthDate": "1985-05-05", "gender": "female" }),
        );

        let response = app.oneshot(request).await.unwrap();
        let (logs, usage) = wait_for_rows(&db).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(logs, 1);
        assert_eq!(usage, 1);

        let log = access_log::Entity::find().one(&db).await.unwrap().unwrap();
        assert_eq!(log.fortune_type.as_deref(), Some("재물운"));
        assert_eq!(log.ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(log.user_agent.as_deref(), Some("integration-test"));
        assert_eq!(log.birth_date.as_deref(), Some("1985-05-05"));

        let used = api_usage::Entity::find().one(&db).await.unwrap().unwrap();
        assert_eq!(used.tokens_used, 1000);
        assert!((used.estimated_cost - 0.045).abs() < 1e-9);
    }

    #[tokio::test]
    async fn should_return_400_without_birth_date() {
        let (app, _db, seen) = setup(generated("풀이")).await;
        let request = create_json_request(SAJU_URI, json!({ "category": "오늘의 운세" }));

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "생년월일 정보가 필요합니다");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_400_when_compatibility_partner_missing() {
        let (app, _db, seen) = setup(generated("풀이")).await;
        let request = create_json_request(
            SAJU_URI,
            json!({
                "category": "궁합",
                "user1": { "birthDate": "1990-01-01", "gender": "male" },
                "user2": null
            }),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["error"], "두 사람의 정보가 필요합니다");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_describe_both_people_for_compatibility() {
        let (app, _db, seen) = setup(generated("궁합 풀이")).await;
        let request = create_json_request(
            SAJU_URI,
            json!({
                "category": "compatibility",
                "user1": { "birthDate": "1990-01-01", "gender": "male" },
                "user2": { "birthDate": "1992-02-02", "gender": "female" }
            }),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let seen = seen.lock().unwrap();
        assert!(seen[0].user_instruction.contains("첫 번째 사람"));
        assert!(seen[0].user_instruction.contains("두 번째 사람"));
        assert!(seen[0].user_instruction.contains("1992-02-02"));
    }

    #[tokio::test]
    async fn should_return_400_for_malformed_body() {
        let (app, _db, _seen) = setup(generated("풀이")).await;
        let request = Request::builder()
            .method("POST")
            .uri(SAJU_URI)
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "요청 데이터가 없습니다");
    }

    #[tokio::test]
    async fn should_return_500_when_generation_fails() {
        let (app, db, _seen) = setup(Err("upstream timeout".to_string())).await;
        let request = create_json_request(
            SAJU_URI,
            json!({ "category": "오늘의 운세", "birthDate": "1990-01-01" }),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"],
            "사주 풀이 중 오류가 발생했습니다: upstream timeout"
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(access_log::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn should_return_500_when_client_not_configured() {
        let unconfigured = build_client(&test_config().openai);
        let (app, _db) = setup_with(unconfigured).await;
        let request = create_json_request(
            SAJU_URI,
            json!({ "category": "오늘의 운세", "birthDate": "1990-01-01" }),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["error"], "OpenAI 클라이언트가 초기화되지 않았습니다");
    }
}

// ===== Public Endpoint Tests =====

mod public_api {
    use super::*;

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn should_report_health() {
        let (app, _db, _seen) = setup(generated("풀이")).await;

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["port"], 2222);
        assert_eq!(body["apiKeyConfigured"], true);
    }

    #[tokio::test]
    async fn should_return_default_settings() {
        let (app, _db, _seen) = setup(generated("풀이")).await;

        let response = app.oneshot(get("/api/settings")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["settings"]["site_title"], "도사운세");
        assert_eq!(
            body["settings"]["youtube_url"],
            "https://www.youtube.com/@dosaunse"
        );
    }
}
