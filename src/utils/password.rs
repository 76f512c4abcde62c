//! Argon2id 비밀번호 해시/검증

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::error::AppError;

/// 관리자 비밀번호 최소 길이
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// 평문 비밀번호를 PHC 문자열로 해시합니다.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal_error(format!("비밀번호 해시 실패: {}", e)))
}

/// 저장된 해시와 평문 비밀번호를 비교합니다.
///
/// 해시 형식이 손상된 경우에도 `false`를 반환합니다.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("저장된 비밀번호 해시 형식이 올바르지 않습니다");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
