use axum::http::HeaderValue;

use crate::utils::error::AppError;

/// 관리자 세션 쿠키 이름
pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

fn build_cookie(name: &str, value: &str, max_age_seconds: i64) -> Result<HeaderValue, AppError> {
    let cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        name, value, max_age_seconds
    );
    HeaderValue::from_str(&cookie)
        .map_err(|_| AppError::InternalError(format!("Invalid {} cookie value", name)))
}

/// 관리자 세션 쿠키 생성
pub fn create_session_cookie(token: &str, max_age_seconds: i64) -> Result<HeaderValue, AppError> {
    build_cookie(ADMIN_SESSION_COOKIE, token, max_age_seconds)
}

/// 관리자 세션 쿠키 삭제 (만료 처리)
pub fn clear_session_cookie() -> Result<HeaderValue, AppError> {
    build_cookie(ADMIN_SESSION_COOKIE, "", 0)
}

/// `Cookie` 헤더 값에서 지정한 쿠키 값을 찾습니다.
pub fn find_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_session_cookie() {
        let cookie = create_session_cookie("abc", 60).unwrap();
        let cookie = cookie.to_str().unwrap();

        assert!(cookie.starts_with("admin_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=60"));
    }

    #[test]
    fn should_expire_cleared_cookie() {
        let cookie = clear_session_cookie().unwrap();
        assert!(cookie.to_str().unwrap().contains("Max-Age=0"));
    }

    #[test]
    fn should_find_cookie_among_others() {
        let header = "theme=dark; admin_session=token123; lang=ko";
        assert_eq!(find_cookie(header, ADMIN_SESSION_COOKIE), Some("token123"));
        assert_eq!(find_cookie("admin_session=", ADMIN_SESSION_COOKIE), None);
        assert_eq!(find_cookie("theme=dark", ADMIN_SESSION_COOKIE), None);
    }
}
