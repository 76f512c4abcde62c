use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, warn};

use super::dto::{AdminItem, ChangePasswordRequest, CreateAdminRequest, LoginRequest};
use super::entity::admin;
use crate::config::DefaultAdmin;
use crate::utils::error::AppError;
use crate::utils::password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};

const INVALID_CREDENTIALS: &str = "아이디 또는 비밀번호가 올바르지 않습니다.";

pub struct AccountService;

impl AccountService {
    /// 아이디/비밀번호 확인 후 마지막 로그인 시각을 갱신합니다.
    pub async fn authenticate(
        db: &DatabaseConnection,
        req: &LoginRequest,
    ) -> Result<admin::Model, AppError> {
        let found = admin::Entity::find()
            .filter(admin::Column::Username.eq(req.username.as_str()))
            .one(db)
            .await?;

        let Some(found) = found.filter(|a| verify_password(&req.password, &a.password_hash)) else {
            warn!(username = %req.username, "관리자 로그인 실패");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let mut active = found.into_active_model();
        active.last_login = Set(Some(Utc::now().naive_utc()));
        let updated = active.update(db).await?;

        info!(username = %updated.username, "관리자 로그인");
        Ok(updated)
    }

    /// 관리자 목록 (가입순)
    pub async fn list_admins(db: &DatabaseConnection) -> Result<Vec<AdminItem>, AppError> {
        let admins = admin::Entity::find()
            .order_by_asc(admin::Column::CreatedAt)
            .order_by_asc(admin::Column::Id)
            .all(db)
            .await?;

        Ok(admins.into_iter().map(AdminItem::from).collect())
    }

    /// 관리자 추가 (아이디/이메일 중복 불가)
    pub async fn create_admin(
        db: &DatabaseConnection,
        req: CreateAdminRequest,
        requested_by: &str,
    ) -> Result<AdminItem, AppError> {
        let username_taken = admin::Entity::find()
            .filter(admin::Column::Username.eq(req.username.as_str()))
            .one(db)
            .await?
            .is_some();
        if username_taken {
            return Err(AppError::Conflict("이미 존재하는 아이디입니다.".to_string()));
        }

        let email_taken = admin::Entity::find()
            .filter(admin::Column::Email.eq(req.email.as_str()))
            .one(db)
            .await?
            .is_some();
        if email_taken {
            return Err(AppError::Conflict("이미 존재하는 이메일입니다.".to_string()));
        }

        let created = Self::insert_admin(db, &req.username, &req.email, &req.password).await?;

        info!(username = %created.username, by = %requested_by, "새 관리자 추가");
        Ok(AdminItem::from(created))
    }

    /// 관리자 삭제 (자기 자신은 삭제 불가)
    pub async fn delete_admin(
        db: &DatabaseConnection,
        target_id: i32,
        current_admin_id: i32,
    ) -> Result<(), AppError> {
        if target_id == current_admin_id {
            return Err(AppError::BadRequest(
                "자기 자신을 삭제할 수 없습니다.".to_string(),
            ));
        }

        let target = admin::Entity::find_by_id(target_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 관리자입니다.".to_string()))?;

        let username = target.username.clone();
        target.delete(db).await?;

        info!(username = %username, by = current_admin_id, "관리자 삭제");
        Ok(())
    }

    /// 로그인한 관리자의 비밀번호 변경
    pub async fn change_password(
        db: &DatabaseConnection,
        admin_id: i32,
        req: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let current = admin::Entity::find_by_id(admin_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("존재하지 않는 관리자입니다.".to_string()))?;

        if !verify_password(&req.current_password, &current.password_hash) {
            return Err(AppError::BadRequest(
                "현재 비밀번호가 올바르지 않습니다.".to_string(),
            ));
        }
        if req.new_password != req.confirm_password {
            return Err(AppError::BadRequest(
                "새 비밀번호가 일치하지 않습니다.".to_string(),
            ));
        }
        if req.new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(format!(
                "비밀번호는 최소 {}자 이상이어야 합니다.",
                MIN_PASSWORD_LENGTH
            )));
        }

        let username = current.username.clone();
        let mut active = current.into_active_model();
        active.password_hash = Set(hash_password(&req.new_password)?);
        active.update(db).await?;

        info!(username = %username, "비밀번호 변경");
        Ok(())
    }

    /// 기본 관리자 계정이 없으면 생성합니다.
    pub async fn ensure_default_admin(
        db: &DatabaseConnection,
        default_admin: &DefaultAdmin,
    ) -> Result<(), AppError> {
        let exists = admin::Entity::find()
            .filter(admin::Column::Username.eq(default_admin.username.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            return Ok(());
        }

        Self::insert_admin(
            db,
            &default_admin.username,
            &default_admin.email,
            &default_admin.password,
        )
        .await?;

        warn!(
            username = %default_admin.username,
            "기본 관리자 계정을 생성했습니다. 비밀번호를 즉시 변경하세요."
        );
        Ok(())
    }

    async fn insert_admin(
        db: &DatabaseConnection,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<admin::Model, AppError> {
        let model = admin::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(hash_password(password)?),
            email: Set(email.to_string()),
            created_at: Set(Utc::now().naive_utc()),
            last_login: Set(None),
            ..Default::default()
        };

        Ok(model.insert(db).await?)
    }
}
