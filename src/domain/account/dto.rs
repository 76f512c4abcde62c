use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::admin;
use crate::domain::access_log::dto::TIMESTAMP_FORMAT;

// ============== 로그인 ==============

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "아이디를 입력해주세요."))]
    #[schema(example = "admin")]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub admin_id: i32,
    pub username: String,
    /// 세션 유효 시간 (초)
    pub expires_in: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessLoginResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: LoginResponse,
}

// ============== 계정 관리 ==============

/// 관리자 계정 항목
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminItem {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[schema(example = "2025-01-01 12:00:00")]
    pub created_at: String,
    pub last_login: Option<String>,
}

impl From<admin::Model> for AdminItem {
    fn from(model: admin::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            created_at: model.created_at.format(TIMESTAMP_FORMAT).to_string(),
            last_login: model
                .last_login
                .map(|at| at.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessAdminListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<AdminItem>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    #[validate(length(min = 1, max = 80, message = "아이디는 1~80자여야 합니다."))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 형식이 아닙니다."))]
    pub email: String,

    #[validate(length(min = 6, message = "비밀번호는 최소 6자 이상이어야 합니다."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessAdminResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: AdminItem,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use validator::Validate;

    #[test]
    fn should_reject_short_password_and_bad_email() {
        let req = CreateAdminRequest {
            username: "manager".into(),
            email: "not-an-email".into(),
            password: "12345".into(),
        };

        let errors = req.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn should_hide_password_hash_in_item() {
        let created_at =
            NaiveDateTime::parse_from_str("2025-01-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let item = AdminItem::from(admin::Model {
            id: 1,
            username: "admin".into(),
            password_hash: "$argon2id$secret".into(),
            email: "admin@dosa.com".into(),
            created_at,
            last_login: None,
        });

        let json = serde_json::to_string(&item).unwrap();

        assert!(!json.contains("argon2"));
        assert!(json.contains("\"createdAt\":\"2025-01-01 00:00:00\""));
        assert!(json.contains("\"lastLogin\":null"));
    }
}
