use axum::{
    async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::header::COOKIE,
    http::request::Parts,
};

use sea_orm::EntityTrait;

use crate::domain::account::entity::admin;
use crate::state::AppState;
use crate::utils::cookie::{find_cookie, ADMIN_SESSION_COOKIE};
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_session_token, Claims};

/// 로그인한 관리자 정보를 담는 Extractor
pub struct AdminUser(pub Claims);

impl AdminUser {
    /// 세션 Claims에서 관리자 ID를 추출합니다.
    pub fn admin_id(&self) -> Result<i32, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("유효하지 않은 관리자 ID입니다.".to_string()))
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // 1. Authorization 헤더 우선, 2. 세션 쿠키
        let token = if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
            let auth_header_str = auth_header
                .to_str()
                .map_err(|_| AppError::Unauthorized("잘못된 헤더 형식입니다.".to_string()))?;

            auth_header_str
                .strip_prefix("Bearer ")
                .ok_or_else(|| {
                    AppError::Unauthorized("토큰 형식이 올바르지 않습니다.".to_string())
                })?
                .to_string()
        } else {
            extract_token_from_cookie(parts)?
        };

        let claims = decode_session_token(&token, &state.config.session_secret)?;
        let user = AdminUser(claims);

        // 토큰이 유효해도 삭제된 계정이면 거부
        admin::Entity::find_by_id(user.admin_id()?)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("존재하지 않는 관리자입니다.".to_string()))?;

        Ok(user)
    }
}

fn extract_token_from_cookie(parts: &Parts) -> Result<String, AppError> {
    let cookie_header = parts
        .headers
        .get(COOKIE)
        .ok_or_else(|| AppError::Unauthorized("로그인이 필요합니다.".to_string()))?;

    let cookie_str = cookie_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("잘못된 쿠키 형식입니다.".to_string()))?;

    find_cookie(cookie_str, ADMIN_SESSION_COOKIE)
        .map(str::to_string)
        .ok_or_else(|| AppError::Unauthorized("로그인이 필요합니다.".to_string()))
}
