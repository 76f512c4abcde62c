use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::birth::{
    BirthRecord, CalendarType, CompatibilityPair, FortuneRequest, FortuneSubject, Gender,
    UNKNOWN_BIRTH_TIME,
};
use super::prompt::{CategoryKind, DEFAULT_CATEGORY};
use crate::utils::error::AppError;

pub const MISSING_BODY_MESSAGE: &str = "요청 데이터가 없습니다";
pub const MISSING_BIRTH_DATE_MESSAGE: &str = "생년월일 정보가 필요합니다";
pub const MISSING_PAIR_MESSAGE: &str = "두 사람의 정보가 필요합니다";

/// 한 사람의 출생 정보 (요청 원본)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BirthInput {
    /// YYYY-MM-DD
    #[schema(example = "1990-01-01")]
    pub birth_date: Option<String>,
    /// 자유 형식, 없으면 "모름"
    #[schema(example = "14:30")]
    pub birth_time: Option<String>,
    /// male / female
    #[schema(example = "male")]
    pub gender: Option<String>,
    /// solar / lunar
    #[schema(example = "solar")]
    pub calendar_type: Option<String>,
}

impl BirthInput {
    /// 생년월일이 없거나 비어 있으면 `None`
    fn to_record(&self) -> Option<BirthRecord> {
        let birth_date = self
            .birth_date
            .as_deref()
            .map(str::trim)
            .filter(|date| !date.is_empty())?;

        let birth_time = self
            .birth_time
            .as_deref()
            .map(str::trim)
            .filter(|time| !time.is_empty())
            .unwrap_or(UNKNOWN_BIRTH_TIME);

        Some(
            BirthRecord::new(birth_date)
                .with_time(birth_time)
                .with_gender(Gender::parse(self.gender.as_deref()))
                .with_calendar(CalendarType::parse(self.calendar_type.as_deref())),
        )
    }
}

/// 사주 풀이 요청
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SajuRequest {
    /// 운세 종류 (기본값: 오늘의 운세)
    #[schema(example = "오늘의 운세")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub birth: BirthInput,
    /// 궁합 첫 번째 사람
    pub user1: Option<BirthInput>,
    /// 궁합 두 번째 사람
    pub user2: Option<BirthInput>,
}

impl SajuRequest {
    /// 요청된 카테고리 (비어 있으면 기본값)
    pub fn category(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn is_compatibility(&self) -> bool {
        CategoryKind::of(self.category()).is_compatibility()
    }

    /// 접속 로그에 남길 출생 정보 원본 (궁합은 첫 번째 사람)
    pub fn primary_input(&self) -> Option<&BirthInput> {
        if self.is_compatibility() {
            self.user1.as_ref()
        } else {
            Some(&self.birth)
        }
    }

    /// 카테고리에 맞는 출생 정보가 있는지 검증합니다.
    pub fn to_fortune_request(&self) -> Result<FortuneRequest, AppError> {
        let subject = if self.is_compatibility() {
            let pair = self
                .user1
                .as_ref()
                .and_then(BirthInput::to_record)
                .zip(self.user2.as_ref().and_then(BirthInput::to_record))
                .ok_or_else(|| AppError::ValidationError(MISSING_PAIR_MESSAGE.to_string()))?;

            FortuneSubject::Pair(CompatibilityPair {
                first: pair.0,
                second: pair.1,
            })
        } else {
            let record = self
                .birth
                .to_record()
                .ok_or_else(|| AppError::ValidationError(MISSING_BIRTH_DATE_MESSAGE.to_string()))?;

            FortuneSubject::Single(record)
        };

        Ok(FortuneRequest {
            category: self.category().to_string(),
            subject,
        })
    }
}

/// 사주 풀이 성공 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct SajuResponse {
    #[schema(example = true)]
    pub success: bool,
    /// 생성된 풀이
    pub result: String,
}

impl SajuResponse {
    pub fn new(result: String) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

/// 사주 풀이 실패 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct SajuErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "생년월일 정보가 필요합니다")]
    pub error: String,
}

/// 공개 API 에러 응답 변환
///
/// 관리자 API와 달리 `{ success, error }` 형태로 응답합니다.
#[derive(Debug)]
pub struct FortuneFailure(pub AppError);

impl From<AppError> for FortuneFailure {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for FortuneFailure {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let error = match &self.0 {
            AppError::JsonParseFailed(_) => MISSING_BODY_MESSAGE.to_string(),
            AppError::GenerationFailed(message) => format!(
                "사주 풀이 중 오류가 발생했습니다: {}",
                message.chars().take(100).collect::<String>()
            ),
            other => other.message(),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = %self.0.error_code(), "사주 풀이 실패: {}", self.0);
        } else {
            tracing::warn!(code = %self.0.error_code(), "사주 요청 거부: {}", self.0);
        }

        (
            status,
            Json(SajuErrorResponse {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    fn parse(value: Value) -> SajuRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn should_default_category_to_today() {
        assert_eq!(parse(json!({})).category(), "오늘의 운세");
        assert_eq!(parse(json!({ "category": "  " })).category(), "오늘의 운세");
        assert_eq!(parse(json!({ "category": " 궁합 " })).category(), "궁합");
    }

    #[test]
    fn should_build_single_subject_from_flat_fields() {
        // Arrange
        let request = parse(json!({
            "category": "오늘의 운세",
            "birthDate": "1990-01-01",
            "calendarType": "solar",
            "gender": "male"
        }));

        // Act
        let fortune = request.to_fortune_request().unwrap();

        // Assert
        let FortuneSubject::Single(record) = fortune.subject else {
            panic!("single subject expected");
        };
        assert_eq!(record.birth_date, "1990-01-01");
        assert_eq!(record.birth_time, "모름");
        assert_eq!(record.gender, Gender::Male);
    }

    #[test]
    fn should_reject_missing_birth_date() {
        for body in [json!({}), json!({ "birthDate": "" }), json!({ "birthDate": null })] {
            let err = parse(body).to_fortune_request().unwrap_err();
            assert_eq!(err.message(), "생년월일 정보가 필요합니다");
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn should_reject_compatibility_without_second_person() {
        let request = parse(json!({
            "category": "궁합",
            "user1": { "birthDate": "1990-01-01", "gender": "male" },
            "user2": null
        }));

        let err = request.to_fortune_request().unwrap_err();

        assert_eq!(err.message(), "두 사람의 정보가 필요합니다");
    }

    #[test]
    fn should_reject_compatibility_with_empty_subject() {
        let request = parse(json!({
            "category": "compatibility",
            "user1": { "birthDate": "1990-01-01" },
            "user2": {}
        }));

        assert!(request.to_fortune_request().is_err());
    }

    #[test]
    fn should_build_pair_and_log_first_person() {
        let request = parse(json!({
            "category": "궁합",
            "birthDate": "1970-01-01",
            "user1": { "birthDate": "1990-01-01", "gender": "male" },
            "user2": { "birthDate": "1992-02-02", "gender": "female", "calendarType": "lunar" }
        }));

        let fortune = request.to_fortune_request().unwrap();

        assert!(matches!(fortune.subject, FortuneSubject::Pair(_)));
        assert_eq!(
            request.primary_input().and_then(|b| b.birth_date.as_deref()),
            Some("1990-01-01")
        );
    }

    #[tokio::test]
    async fn should_truncate_generation_error_to_hundred_chars() {
        // Arrange
        let failure = FortuneFailure(AppError::GenerationFailed("가".repeat(300)));

        // Act
        let response = failure.into_response();

        // Assert
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        let error = json["error"].as_str().unwrap();
        let detail = error.strip_prefix("사주 풀이 중 오류가 발생했습니다: ").unwrap();
        assert_eq!(detail.chars().count(), 100);
    }

    #[tokio::test]
    async fn should_render_unconfigured_client_message() {
        let response = FortuneFailure(AppError::AiClientUnavailable).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "OpenAI 클라이언트가 초기화되지 않았습니다");
    }
}
