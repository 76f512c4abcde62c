use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::dto::{
    CategoryItem, CreateCategoryRequest, NoticeItem, NoticeRequest, SettingItem,
    UpdateCategoryRequest,
};
use super::entity::{fortune_category, notice, site_setting};
use crate::utils::error::AppError;

/// 저장된 값이 없을 때 공개 API가 내려주는 기본 설정
pub const DEFAULT_SETTINGS: [(&str, &str); 6] = [
    ("site_title", "도사운세"),
    ("header_logo", "도사운세"),
    ("header_subtitle", "전통 사주로 보는 당신의 운명"),
    ("footer_company", "주식회사 대게"),
    ("footer_email", "daegye54@gmail.com"),
    ("youtube_url", "https://www.youtube.com/@dosaunse"),
];

pub struct SiteService;

impl SiteService {
    // ============== 사이트 설정 ==============

    /// 기본값 위에 저장된 설정을 덮어쓴 맵
    pub async fn public_settings(
        db: &DatabaseConnection,
    ) -> Result<BTreeMap<String, String>, AppError> {
        let mut settings: BTreeMap<String, String> = DEFAULT_SETTINGS
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        for stored in site_setting::Entity::find().all(db).await? {
            if let Some(value) = stored.value {
                settings.insert(stored.key, value);
            }
        }

        Ok(settings)
    }

    pub async fn list_settings(db: &DatabaseConnection) -> Result<Vec<SettingItem>, AppError> {
        let settings = site_setting::Entity::find()
            .order_by_asc(site_setting::Column::Key)
            .all(db)
            .await?;

        Ok(settings.into_iter().map(SettingItem::from).collect())
    }

    /// key가 있으면 값을 바꾸고 없으면 추가합니다.
    pub async fn update_settings(
        db: &DatabaseConnection,
        settings: BTreeMap<String, String>,
        requested_by: &str,
    ) -> Result<Vec<SettingItem>, AppError> {
        if settings.keys().any(|key| key.trim().is_empty()) {
            return Err(AppError::BadRequest("설정 키가 비어 있습니다.".to_string()));
        }

        let now = Utc::now().naive_utc();
        let txn = db.begin().await?;

        for (key, value) in &settings {
            let existing = site_setting::Entity::find()
                .filter(site_setting::Column::Key.eq(key.as_str()))
                .one(&txn)
                .await?;

            match existing {
                Some(found) => {
                    let mut active = found.into_active_model();
                    active.value = Set(Some(value.clone()));
                    active.updated_at = Set(now);
                    active.update(&txn).await?;
                }
                None => {
                    site_setting::ActiveModel {
                        key: Set(key.clone()),
                        value: Set(Some(value.clone())),
                        description: Set(None),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await?;
                }
            }
        }

        txn.commit().await?;

        info!(count = settings.len(), by = %requested_by, "사이트 설정 저장");
        Self::list_settings(db).await
    }

    // ============== 운세 카테고리 ==============

    pub async fn list_categories(db: &DatabaseConnection) -> Result<Vec<CategoryItem>, AppError> {
        let categories = fortune_category::Entity::find()
            .order_by_asc(fortune_category::Column::SortOrder)
            .order_by_asc(fortune_category::Column::Id)
            .all(db)
            .await?;

        Ok(categories.into_iter().map(CategoryItem::from).collect())
    }

    pub async fn create_category(
        db: &DatabaseConnection,
        req: CreateCategoryRequest,
    ) -> Result<CategoryItem, AppError> {
        let key_taken = fortune_category::Entity::find()
            .filter(fortune_category::Column::Key.eq(req.key.as_str()))
            .one(db)
            .await?
            .is_some();
        if key_taken {
            return Err(AppError::Conflict(
                "이미 존재하는 카테고리 키입니다.".to_string(),
            ));
        }

        let created = fortune_category::ActiveModel {
            name: Set(req.name),
            key: Set(req.key),
            icon: Set(req.icon),
            color: Set(req.color),
            description: Set(req.description),
            is_active: Set(req.is_active),
            sort_order: Set(req.sort_order),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(key = %created.key, "운세 카테고리 추가");
        Ok(CategoryItem::from(created))
    }

    pub async fn update_category(
        db: &DatabaseConnection,
        category_id: i32,
        req: UpdateCategoryRequest,
    ) -> Result<CategoryItem, AppError> {
        let found = Self::find_category(db, category_id).await?;

        let mut active = found.into_active_model();
        active.name = Set(req.name);
        active.icon = Set(req.icon);
        active.color = Set(req.color);
        active.description = Set(req.description);
        active.is_active = Set(req.is_active);
        active.sort_order = Set(req.sort_order);
        let updated = active.update(db).await?;

        Ok(CategoryItem::from(updated))
    }

    pub async fn delete_category(db: &DatabaseConnection, category_id: i32) -> Result<(), AppError> {
        let found = Self::find_category(db, category_id).await?;
        let key = found.key.clone();
        found.delete(db).await?;

        info!(key = %key, "운세 카테고리 삭제");
        Ok(())
    }

    async fn find_category(
        db: &DatabaseConnection,
        category_id: i32,
    ) -> Result<fortune_category::Model, AppError> {
        fortune_category::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 카테고리입니다.".to_string()))
    }

    // ============== 공지사항 ==============

    /// 우선순위 높은 순, 같으면 최신순
    pub async fn list_notices(db: &DatabaseConnection) -> Result<Vec<NoticeItem>, AppError> {
        let notices = notice::Entity::find()
            .order_by_desc(notice::Column::Priority)
            .order_by_desc(notice::Column::CreatedAt)
            .order_by_desc(notice::Column::Id)
            .all(db)
            .await?;

        Ok(notices.into_iter().map(NoticeItem::from).collect())
    }

    pub async fn create_notice(
        db: &DatabaseConnection,
        req: NoticeRequest,
    ) -> Result<NoticeItem, AppError> {
        Self::check_period(&req)?;

        let now = Utc::now().naive_utc();
        let created = notice::ActiveModel {
            title: Set(req.title),
            content: Set(req.content),
            is_active: Set(req.is_active),
            priority: Set(req.priority),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(notice_id = created.id, "공지사항 추가");
        Ok(NoticeItem::from(created))
    }

    pub async fn update_notice(
        db: &DatabaseConnection,
        notice_id: i32,
        req: NoticeRequest,
    ) -> Result<NoticeItem, AppError> {
        Self::check_period(&req)?;
        let found = Self::find_notice(db, notice_id).await?;

        let mut active = found.into_active_model();
        active.title = Set(req.title);
        active.content = Set(req.content);
        active.is_active = Set(req.is_active);
        active.priority = Set(req.priority);
        active.start_date = Set(req.start_date);
        active.end_date = Set(req.end_date);
        active.updated_at = Set(Utc::now().naive_utc());
        let updated = active.update(db).await?;

        Ok(NoticeItem::from(updated))
    }

    pub async fn delete_notice(db: &DatabaseConnection, notice_id: i32) -> Result<(), AppError> {
        let found = Self::find_notice(db, notice_id).await?;
        found.delete(db).await?;

        info!(notice_id = notice_id, "공지사항 삭제");
        Ok(())
    }

    async fn find_notice(db: &DatabaseConnection, notice_id: i32) -> Result<notice::Model, AppError> {
        notice::Entity::find_by_id(notice_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 공지사항입니다.".to_string()))
    }

    fn check_period(req: &NoticeRequest) -> Result<(), AppError> {
        match (req.start_date, req.end_date) {
            (Some(start), Some(end)) if end < start => Err(AppError::BadRequest(
                "종료일은 시작일 이후여야 합니다.".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
