use std::env;
use std::str::FromStr;

/// 값이 없을 때 API 키로 취급하지 않는 자리표시자
const API_KEY_PLACEHOLDER: &str = "your_openai_api_key_here";

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    /// 시작 시 누락된 테이블 생성 여부
    pub schema_sync: bool,

    // Admin session
    pub session_secret: String,
    pub session_ttl_seconds: i64,
    pub default_admin: DefaultAdmin,

    // Fortune generation
    pub openai: OpenAiSettings,
    pub rate_limit_enabled: bool,

    pub static_dir: String,
}

/// 생성 클라이언트 설정 (시작 시 한 번 구성되어 주입됨)
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub model: String,
}

impl OpenAiSettings {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// 최초 실행 시 생성되는 관리자 계정
#[derive(Debug, Clone)]
pub struct DefaultAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = parse_var("PORT", 2222_u16, ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://dosa_admin.db?mode=rwc".to_string());
        let schema_sync = parse_var("DB_SCHEMA_UPDATE", true, ConfigError::InvalidFlag("DB_SCHEMA_UPDATE"))?;

        let session_secret = env::var("SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!(
                "SECRET_KEY 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요."
            );
            "dosa-secret-key-change-in-production".to_string()
        });
        let session_ttl_seconds =
            parse_var("ADMIN_SESSION_TTL", 86_400_i64, ConfigError::InvalidExpiration)?;

        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty() && key != API_KEY_PLACEHOLDER);
        if api_key.is_none() {
            tracing::error!("OPENAI_API_KEY 환경변수가 설정되지 않았습니다");
        }
        let timeout_seconds = parse_var("OPENAI_TIMEOUT", 30_u64, ConfigError::InvalidTimeout)?;
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let rate_limit_enabled = parse_var(
            "RATE_LIMIT_ENABLED",
            true,
            ConfigError::InvalidFlag("RATE_LIMIT_ENABLED"),
        )?;

        let default_admin = DefaultAdmin {
            username: env::var("DEFAULT_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            email: env::var("DEFAULT_ADMIN_EMAIL").unwrap_or_else(|_| "admin@dosa.com".to_string()),
            password: env::var("DEFAULT_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin1234".to_string()),
        };

        Ok(Self {
            server_port,
            database_url,
            schema_sync,
            session_secret,
            session_ttl_seconds,
            default_admin,
            openai: OpenAiSettings {
                api_key,
                timeout_seconds,
                model,
            },
            rate_limit_enabled,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        })
    }
}

fn parse_var<T: FromStr>(name: &str, default: T, error: ConfigError) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| error),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid session expiration time")]
    InvalidExpiration,
    #[error("Invalid OpenAI timeout seconds")]
    InvalidTimeout,
    #[error("Invalid boolean value for {0}")]
    InvalidFlag(&'static str),
}
