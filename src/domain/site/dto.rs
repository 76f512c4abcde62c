use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::{fortune_category, notice, site_setting};
use crate::domain::access_log::dto::TIMESTAMP_FORMAT;

// ============== 사이트 설정 ==============

/// 공개 사이트 설정 응답
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicSettingsResponse {
    #[schema(example = true)]
    pub success: bool,
    /// 저장된 설정 + 기본값
    pub settings: BTreeMap<String, String>,
}

/// 사이트 설정 항목
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingItem {
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub updated_at: String,
}

impl From<site_setting::Model> for SettingItem {
    fn from(model: site_setting::Model) -> Self {
        Self {
            key: model.key,
            value: model.value,
            description: model.description,
            updated_at: model.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessSettingListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<SettingItem>,
}

/// 설정 저장 요청 (key → value, 없으면 추가)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub settings: BTreeMap<String, String>,
}

// ============== 운세 카테고리 ==============

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItem {
    pub id: i32,
    pub name: String,
    pub key: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: String,
}

impl From<fortune_category::Model> for CategoryItem {
    fn from(model: fortune_category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            key: model.key,
            icon: model.icon,
            color: model.color,
            description: model.description,
            is_active: model.is_active,
            sort_order: model.sort_order,
            created_at: model.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessCategoryListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<CategoryItem>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessCategoryResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: CategoryItem,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "카테고리 이름은 1~50자여야 합니다."))]
    #[schema(example = "오늘의 운세")]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "카테고리 키는 1~50자여야 합니다."))]
    #[schema(example = "today")]
    pub key: String,

    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

/// 카테고리 수정 요청 (키는 변경 불가)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 50, message = "카테고리 이름은 1~50자여야 합니다."))]
    pub name: String,

    pub icon: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub sort_order: i32,
}

// ============== 공지사항 ==============

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeItem {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub priority: i32,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<notice::Model> for NoticeItem {
    fn from(model: notice::Model) -> Self {
        let fmt = |at: NaiveDateTime| at.format(TIMESTAMP_FORMAT).to_string();
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            is_active: model.is_active,
            priority: model.priority,
            start_date: model.start_date.map(fmt),
            end_date: model.end_date.map(fmt),
            created_at: fmt(model.created_at),
            updated_at: fmt(model.updated_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessNoticeListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<NoticeItem>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessNoticeResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: NoticeItem,
}

/// 공지사항 추가/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoticeRequest {
    #[validate(length(min = 1, max = 200, message = "공지 제목은 1~200자여야 합니다."))]
    pub title: String,

    #[validate(length(min = 1, message = "공지 내용을 입력해주세요."))]
    pub content: String,

    #[serde(default = "default_true")]
    pub is_active: bool,
    /// 높을수록 먼저 노출
    #[serde(default)]
    pub priority: i32,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}
