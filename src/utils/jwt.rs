use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AppError;

/// 관리자 세션 토큰 타입
const SESSION_TOKEN_TYPE: &str = "admin_session";

/// 관리자 세션 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (Admin ID)
    pub sub: String,
    /// 관리자 아이디
    pub username: String,
    /// Issued At
    pub iat: usize,
    /// Expiration
    pub exp: usize,
    /// Token Type
    pub token_type: String,
}

/// 관리자 세션 토큰 생성
pub fn encode_session_token(
    admin_id: i32,
    username: &str,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(expiration_seconds))
        .ok_or_else(|| AppError::internal_error("세션 만료 시각 계산에 실패했습니다."))?
        .timestamp() as usize;

    let claims = Claims {
        sub: admin_id.to_string(),
        username: username.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration,
        token_type: SESSION_TOKEN_TYPE.to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token creation failed: {}", e)))
}

/// 관리자 세션 토큰 검증
pub fn decode_session_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("세션이 만료되었습니다. 다시 로그인해주세요.".into())
        }
        _ => AppError::Unauthorized("유효하지 않은 세션입니다.".into()),
    })?;

    if claims.token_type != SESSION_TOKEN_TYPE {
        return Err(AppError::Unauthorized("유효하지 않은 세션입니다.".into()));
    }

    Ok(claims)
}
