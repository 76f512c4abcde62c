//! 사주 풀이 도메인
//!
//! - `calendar`: 음력 → 양력 변환
//! - `birth`: 출생 정보 값 타입
//! - `prompt`: 카테고리별 프롬프트 디스패처
//! - `client`: 생성 클라이언트
//! - `recorder`: 접속 로그/사용량 비동기 기록

pub mod birth;
pub mod calendar;
pub mod client;
pub mod dto;
pub mod handler;
pub mod prompt;
pub mod recorder;
pub mod service;

pub use client::{build_client, AiClient, AiClientTrait, Generation};
pub use service::FortuneService;
