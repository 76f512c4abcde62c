use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};
use tracing::info;

use super::dto::{
    AccessLogItem, AccessLogPage, CountStat, DailyStat, DashboardResponse, HourlyStat, LogFilter,
    LogFilterParams, SystemStatusResponse, LOGS_PER_PAGE,
};
use super::entity::{access_log, api_usage};
use crate::domain::account::entity::admin;
use crate::domain::site::entity::notice;
use crate::utils::error::AppError;

/// 1,000 토큰당 추정 비용 (달러)
pub const COST_PER_THOUSAND_TOKENS: f64 = 0.045;

/// 대시보드/통계 상위 항목 수
const TOP_STATS_LIMIT: usize = 10;
const RECENT_LOGS_LIMIT: u64 = 20;
/// 최근 기간 통계 범위 (일)
const RECENT_DAYS: i64 = 7;

/// 접속 로그 한 건 (요청 원본 그대로)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessRecord {
    pub fortune_type: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub birth_date: Option<String>,
    pub birth_time: Option<String>,
    pub gender: Option<String>,
    pub calendar_type: Option<String>,
}

/// 생성 API 사용량 한 건
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub category: String,
    pub tokens_used: u32,
    /// 초 단위
    pub response_time: f64,
}

/// 토큰 사용량 기준 추정 비용
pub fn estimated_cost(tokens_used: u32) -> f64 {
    f64::from(tokens_used) / 1000.0 * COST_PER_THOUSAND_TOKENS
}

pub struct AccessLogService;

impl AccessLogService {
    /// 접속 로그 저장
    pub async fn record_access(
        db: &DatabaseConnection,
        record: AccessRecord,
    ) -> Result<(), AppError> {
        let model = access_log::ActiveModel {
            ip_address: Set(record.ip_address),
            user_agent: Set(record.user_agent),
            birth_date: Set(record.birth_date),
            birth_time: Set(record.birth_time),
            gender: Set(record.gender),
            calendar_type: Set(record.calendar_type),
            fortune_type: Set(Some(record.fortune_type)),
            timestamp: Set(Utc::now().naive_utc()),
            location: Set(None),
            ..Default::default()
        };

        access_log::Entity::insert(model).exec(db).await?;
        Ok(())
    }

    /// 생성 API 사용량 저장
    pub async fn record_usage(db: &DatabaseConnection, record: UsageRecord) -> Result<(), AppError> {
        let model = api_usage::ActiveModel {
            category: Set(Some(record.category)),
            tokens_used: Set(i32::try_from(record.tokens_used).unwrap_or(i32::MAX)),
            estimated_cost: Set(estimated_cost(record.tokens_used)),
            response_time: Set(Some(record.response_time)),
            timestamp: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        api_usage::Entity::insert(model).exec(db).await?;
        Ok(())
    }

    /// 필터를 적용한 접속 로그 한 페이지 (최신순)
    pub async fn list_logs(
        db: &DatabaseConnection,
        params: LogFilterParams,
    ) -> Result<AccessLogPage, AppError> {
        let filter = params.to_filter()?;
        let page = params.page();

        let paginator = Self::filtered(&filter)
            .order_by_desc(access_log::Column::Timestamp)
            .order_by_desc(access_log::Column::Id)
            .paginate(db, LOGS_PER_PAGE);

        let totals = paginator.num_items_and_pages().await?;
        let items = paginator.fetch_page(page - 1).await?;

        Ok(AccessLogPage {
            items: items.into_iter().map(AccessLogItem::from).collect(),
            page,
            per_page: LOGS_PER_PAGE,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    /// 필터를 적용한 전체 접속 로그 (최신순)
    pub async fn export_logs(
        db: &DatabaseConnection,
        params: &LogFilterParams,
    ) -> Result<Vec<access_log::Model>, AppError> {
        let filter = params.to_filter()?;

        let logs = Self::filtered(&filter)
            .order_by_desc(access_log::Column::Timestamp)
            .order_by_desc(access_log::Column::Id)
            .all(db)
            .await?;

        info!(count = logs.len(), "접속 로그 내보내기 조회");
        Ok(logs)
    }

    /// 대시보드 통계
    pub async fn dashboard(
        db: &DatabaseConnection,
        now: NaiveDateTime,
    ) -> Result<DashboardResponse, AppError> {
        let today = start_of_day(now.date());
        let tomorrow = today + Duration::days(1);
        let week_ago = today - Duration::days(RECENT_DAYS);

        let total_access = access_log::Entity::find().count(db).await?;
        let today_access = Self::count_between(db, today, tomorrow).await?;
        let week_access = access_log::Entity::find()
            .filter(access_log::Column::Timestamp.gte(week_ago))
            .count(db)
            .await?;

        let fortune_stats = top_counts(
            Self::count_by(db, access_log::Column::FortuneType, false).await?,
        );
        let gender_stats = Self::count_by(db, access_log::Column::Gender, true).await?;

        let recent_logs = access_log::Entity::find()
            .order_by_desc(access_log::Column::Timestamp)
            .order_by_desc(access_log::Column::Id)
            .limit(RECENT_LOGS_LIMIT)
            .all(db)
            .await?
            .into_iter()
            .map(AccessLogItem::from)
            .collect();

        let todays = Self::timestamps_since(db, today, Some(tomorrow)).await?;
        let hourly_stats = hourly_histogram(&todays);

        Ok(DashboardResponse {
            total_access,
            today_access,
            week_access,
            fortune_stats,
            gender_stats,
            recent_logs,
            hourly_stats,
        })
    }

    /// 데이터베이스 통계
    pub async fn system_status(
        db: &DatabaseConnection,
        now: NaiveDateTime,
    ) -> Result<SystemStatusResponse, AppError> {
        let week_ago = start_of_day(now.date()) - Duration::days(RECENT_DAYS);

        let total_logs = access_log::Entity::find().count(db).await?;
        let total_api_calls = api_usage::Entity::find().count(db).await?;
        let total_admins = admin::Entity::find().count(db).await?;
        let total_notices = notice::Entity::find().count(db).await?;

        let daily_stats = daily_histogram(&Self::timestamps_since(db, week_ago, None).await?);
        let gender_stats = Self::count_by(db, access_log::Column::Gender, false).await?;
        let category_stats = top_counts(
            Self::count_by(db, access_log::Column::FortuneType, false).await?,
        );

        Ok(SystemStatusResponse {
            total_logs,
            total_api_calls,
            total_admins,
            total_notices,
            daily_stats,
            gender_stats,
            category_stats,
        })
    }

    fn filtered(filter: &LogFilter) -> Select<access_log::Entity> {
        let mut query = access_log::Entity::find();

        if let Some(fortune_type) = &filter.fortune_type {
            query = query.filter(access_log::Column::FortuneType.eq(fortune_type.as_str()));
        }
        if let Some(gender) = &filter.gender {
            query = query.filter(access_log::Column::Gender.eq(gender.as_str()));
        }
        if let Some(from) = filter.from {
            query = query.filter(access_log::Column::Timestamp.gte(from));
        }
        if let Some(until) = filter.until {
            query = query.filter(access_log::Column::Timestamp.lte(until));
        }

        query
    }

    async fn count_between(
        db: &DatabaseConnection,
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        access_log::Entity::find()
            .filter(access_log::Column::Timestamp.gte(from))
            .filter(access_log::Column::Timestamp.lt(until))
            .count(db)
            .await
    }

    /// 컬럼 값별 건수 (건수 내림차순)
    async fn count_by(
        db: &DatabaseConnection,
        column: access_log::Column,
        skip_null: bool,
    ) -> Result<Vec<CountStat>, DbErr> {
        let mut query = access_log::Entity::find()
            .select_only()
            .column(column)
            .column_as(Expr::col(access_log::Column::Id).count(), "count")
            .group_by(column);

        if skip_null {
            query = query.filter(column.is_not_null());
        }

        let rows: Vec<(Option<String>, i64)> = query.into_tuple().all(db).await?;

        let mut stats: Vec<CountStat> = rows
            .into_iter()
            .map(|(label, count)| CountStat { label, count })
            .collect();
        stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        Ok(stats)
    }

    async fn timestamps_since(
        db: &DatabaseConnection,
        from: NaiveDateTime,
        until: Option<NaiveDateTime>,
    ) -> Result<Vec<NaiveDateTime>, DbErr> {
        let mut query = access_log::Entity::find()
            .select_only()
            .column(access_log::Column::Timestamp)
            .filter(access_log::Column::Timestamp.gte(from));

        if let Some(until) = until {
            query = query.filter(access_log::Column::Timestamp.lt(until));
        }

        query.into_tuple::<NaiveDateTime>().all(db).await
    }
}

fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(chrono::NaiveTime::MIN)
}

fn top_counts(mut stats: Vec<CountStat>) -> Vec<CountStat> {
    stats.truncate(TOP_STATS_LIMIT);
    stats
}

/// 시간대별 건수 (기록이 있는 시간대만, 0시부터)
fn hourly_histogram(timestamps: &[NaiveDateTime]) -> Vec<HourlyStat> {
    let mut buckets: BTreeMap<u32, i64> = BTreeMap::new();
    for ts in timestamps {
        *buckets.entry(ts.hour()).or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|(hour, count)| HourlyStat { hour, count })
        .collect()
}

/// 일별 건수 (기록이 있는 날만, 오래된 날부터)
fn daily_histogram(timestamps: &[NaiveDateTime]) -> Vec<DailyStat> {
    let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for ts in timestamps {
        *buckets.entry(ts.date()).or_default() += 1;
    }

    buckets
        .into_iter()
        .map(|(date, count)| DailyStat {
            date: date.format("%Y-%m-%d").to_string(),
            count,
        })
        .collect()
}
