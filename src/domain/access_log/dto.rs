use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::entity::access_log;
use crate::utils::error::AppError;

/// 로그 목록 한 페이지 크기
pub const LOGS_PER_PAGE: u64 = 50;

/// 관리 화면 시각 표기
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============== 접속 로그 조회/다운로드 ==============

/// 접속 로그 필터
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LogFilterParams {
    /// 운세 종류
    pub fortune_type: Option<String>,
    /// male / female
    pub gender: Option<String>,
    /// 시작일 (YYYY-MM-DD)
    pub date_from: Option<String>,
    /// 종료일 (YYYY-MM-DD, 해당 일 포함)
    pub date_to: Option<String>,
    /// 페이지 번호 (1부터)
    pub page: Option<u64>,
}

/// 파싱이 끝난 접속 로그 필터
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub fortune_type: Option<String>,
    pub gender: Option<String>,
    pub from: Option<NaiveDateTime>,
    /// 종료일 다음 날 0시 (이하 비교)
    pub until: Option<NaiveDateTime>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_day(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!(
            "날짜 형식이 올바르지 않습니다 (YYYY-MM-DD): {}",
            value
        ))
    })
}

impl LogFilterParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn to_filter(&self) -> Result<LogFilter, AppError> {
        let from = non_blank(&self.date_from)
            .map(|day| parse_day(&day))
            .transpose()?
            .and_then(|day| day.and_hms_opt(0, 0, 0));
        let until = non_blank(&self.date_to)
            .map(|day| parse_day(&day))
            .transpose()?
            .and_then(|day| (day + Duration::days(1)).and_hms_opt(0, 0, 0));

        Ok(LogFilter {
            fortune_type: non_blank(&self.fortune_type),
            gender: non_blank(&self.gender),
            from,
            until,
        })
    }
}

/// 접속 로그 항목
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogItem {
    pub id: i32,
    #[schema(example = "2025-01-01 12:00:00")]
    pub timestamp: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub fortune_type: Option<String>,
    pub birth_date: Option<String>,
    pub birth_time: Option<String>,
    pub gender: Option<String>,
    pub calendar_type: Option<String>,
}

impl From<access_log::Model> for AccessLogItem {
    fn from(model: access_log::Model) -> Self {
        Self {
            id: model.id,
            timestamp: model.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ip_address: model.ip_address,
            user_agent: model.user_agent,
            fortune_type: model.fortune_type,
            birth_date: model.birth_date,
            birth_time: model.birth_time,
            gender: model.gender,
            calendar_type: model.calendar_type,
        }
    }
}

/// 접속 로그 페이지
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogPage {
    pub items: Vec<AccessLogItem>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessAccessLogPageResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: AccessLogPage,
}

// ============== 통계 ==============

/// 그룹별 건수
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountStat {
    /// 그룹 값 (없으면 null)
    pub label: Option<String>,
    pub count: i64,
}

/// 시간대별 건수 (0~23시)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HourlyStat {
    pub hour: u32,
    pub count: i64,
}

/// 일별 건수
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    #[schema(example = "2025-01-01")]
    pub date: String,
    pub count: i64,
}

/// 관리자 대시보드
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_access: u64,
    pub today_access: u64,
    pub week_access: u64,
    pub fortune_stats: Vec<CountStat>,
    pub gender_stats: Vec<CountStat>,
    pub recent_logs: Vec<AccessLogItem>,
    pub hourly_stats: Vec<HourlyStat>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessDashboardResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: DashboardResponse,
}

/// 데이터베이스 통계
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatusResponse {
    pub total_logs: u64,
    pub total_api_calls: u64,
    pub total_admins: u64,
    pub total_notices: u64,
    pub daily_stats: Vec<DailyStat>,
    pub gender_stats: Vec<CountStat>,
    pub category_stats: Vec<CountStat>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessSystemStatusResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: SystemStatusResponse,
}
