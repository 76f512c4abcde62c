use serde::Serialize;
use utoipa::ToSchema;

/// 헬스체크 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    #[schema(example = "ok")]
    pub status: &'static str,
    #[schema(example = "도사운세 서버가 정상 작동 중입니다")]
    pub message: &'static str,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    #[schema(example = 2222)]
    pub port: u16,
    /// OpenAI API 키 설정 여부
    pub api_key_configured: bool,
    /// 서버 가동 시간 (초)
    #[schema(example = 3600)]
    pub uptime_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_with_camel_case() {
        let status = HealthStatus {
            status: "ok",
            message: "도사운세 서버가 정상 작동 중입니다",
            version: "0.1.0",
            port: 2222,
            api_key_configured: false,
            uptime_secs: 10,
        };

        let json = serde_json::to_string(&status).unwrap();

        assert!(json.contains("\"apiKeyConfigured\":false"));
        assert!(json.contains("\"uptimeSecs\":10"));
        assert!(json.contains("\"port\":2222"));
    }
}
