//! 로깅 초기화 모듈
//!
//! stdout과 일별 로그 파일에 JSON 형식으로 동시 출력합니다.

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,dosa_server=debug,tower_http=debug";
const DEFAULT_LOG_DIR: &str = "logs";
const LOG_FILE_PREFIX: &str = "dosa-server.log";

/// 로그 출력 위치와 필터
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub dir: String,
    pub filter: String,
}

impl LogSettings {
    /// `LOG_DIR`, `RUST_LOG` 환경 변수 (없으면 기본값)
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("LOG_DIR").ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_values(dir: Option<String>, filter: Option<String>) -> Self {
        let non_blank = |v: String| if v.trim().is_empty() { None } else { Some(v) };
        Self {
            dir: dir.and_then(non_blank).unwrap_or_else(|| DEFAULT_LOG_DIR.to_string()),
            filter: filter
                .and_then(non_blank)
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|err| {
            eprintln!("잘못된 로그 필터 '{}': {}", self.filter, err);
            EnvFilter::new(DEFAULT_FILTER)
        })
    }
}

/// 로깅 시스템을 초기화합니다.
///
/// 파일명 형식: `dosa-server.log.YYYY-MM-DD`
/// 반환되는 `WorkerGuard`를 main에서 유지해야 종료 시 버퍼링된 로그가 남습니다.
pub fn init_logging() -> WorkerGuard {
    let settings = LogSettings::from_env();

    let file_appender = rolling::daily(&settings.dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true);

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .with_ansi(false)
        .with_writer(file_writer);

    // 테스트 등에서 이미 등록된 경우 무시
    if let Err(err) = tracing_subscriber::registry()
        .with(settings.env_filter())
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("로깅 초기화 생략: {}", err);
    }

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_defaults_when_unset_or_blank() {
        let settings = LogSettings::from_values(None, Some("  ".into()));

        assert_eq!(settings.dir, "logs");
        assert_eq!(settings.filter, DEFAULT_FILTER);
    }

    #[test]
    fn should_keep_explicit_values() {
        let settings =
            LogSettings::from_values(Some("/var/log/dosa".into()), Some("warn".into()));

        assert_eq!(settings.dir, "/var/log/dosa");
        assert_eq!(settings.filter, "warn");
    }
}
