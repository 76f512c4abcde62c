use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::HeaderMap,
    Json,
};

use super::dto::{FortuneFailure, SajuRequest, SajuResponse};
use super::recorder::ClientMeta;
use super::service::FortuneService;
use crate::state::AppState;
use crate::utils::error::AppError;

/// 사주 풀이 API
///
/// 카테고리에 맞는 프롬프트를 구성해 풀이를 생성합니다.
/// 궁합은 `user1`, `user2` 두 사람의 정보가 모두 필요합니다.
#[utoipa::path(
    post,
    path = "/api/saju",
    request_body = SajuRequest,
    responses(
        (status = 200, description = "풀이 성공", body = SajuResponse),
        (status = 400, description = "출생 정보 누락 또는 잘못된 요청", body = SajuErrorResponse),
        (status = 429, description = "요청 한도 초과", body = ErrorResponse),
        (status = 500, description = "생성 실패", body = SajuErrorResponse)
    ),
    tag = "Fortune"
)]
pub async fn saju(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<SajuRequest>, JsonRejection>,
) -> Result<Json<SajuResponse>, FortuneFailure> {
    let Json(req) = payload.map_err(AppError::from)?;
    let meta = ClientMeta::from_request(&headers, peer.map(|ConnectInfo(addr)| addr));

    let result = FortuneService::tell(&state.db, state.ai_client.as_ref(), &req, meta).await?;

    Ok(Json(SajuResponse::new(result)))
}
