use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 생성 API 사용량 기록
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "api_usage")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category: Option<String>,
    pub tokens_used: i32,
    /// 달러 기준 추정 비용
    pub estimated_cost: f64,
    /// 초 단위
    pub response_time: Option<f64>,
    pub timestamp: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
