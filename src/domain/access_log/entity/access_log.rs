use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 운세 요청 접속 로그
///
/// 요청에 담긴 출생 정보를 가공 없이 그대로 남깁니다.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "access_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// IPv6 포함
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub birth_date: Option<String>,
    pub birth_time: Option<String>,
    pub gender: Option<String>,
    /// solar / lunar
    pub calendar_type: Option<String>,
    /// 운세 종류
    pub fortune_type: Option<String>,
    pub timestamp: DateTime,
    pub location: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
