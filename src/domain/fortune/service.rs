use std::time::Instant;

use chrono::{Local, NaiveDate};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::client::AiClientTrait;
use super::dto::SajuRequest;
use super::prompt::{dispatch, PromptSpec};
use super::recorder::{access_record, record_success, ClientMeta};
use crate::domain::access_log::UsageRecord;
use crate::utils::error::AppError;

pub struct FortuneService;

impl FortuneService {
    /// 요청 검증 후 프롬프트 구성
    ///
    /// 검증에 실패하면 디스패처까지 가지 않습니다.
    pub fn prepare(req: &SajuRequest, today: NaiveDate) -> Result<PromptSpec, AppError> {
        let fortune = req.to_fortune_request()?;

        Ok(dispatch(&fortune.category, &fortune.subject, today))
    }

    /// 사주 풀이 생성
    ///
    /// 성공하면 사용량과 접속 로그를 백그라운드로 저장합니다.
    pub async fn tell(
        db: &DatabaseConnection,
        client: &dyn AiClientTrait,
        req: &SajuRequest,
        meta: ClientMeta,
    ) -> Result<String, AppError> {
        let spec = Self::prepare(req, Local::now().date_naive())?;
        let category = req.category().to_string();

        info!(
            category = %category,
            token_budget = spec.token_budget,
            "사주 풀이 요청"
        );

        let started = Instant::now();
        let generation = client.generate(&spec).await?;
        let response_time = started.elapsed().as_secs_f64();

        info!(
            category = %category,
            tokens_used = generation.tokens_used,
            response_time_secs = response_time,
            "사주 풀이 완료"
        );

        record_success(
            db,
            access_record(req, meta),
            UsageRecord {
                category,
                tokens_used: generation.tokens_used,
                response_time,
            },
        );

        Ok(generation.text)
    }
}
