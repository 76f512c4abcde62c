use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use super::prompt::PromptSpec;
use crate::config::OpenAiSettings;
use crate::utils::error::AppError;

/// 생성 온도 (모든 카테고리 공통)
pub const TEMPERATURE: f32 = 0.7;

/// 생성 결과
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub text: String,
    pub tokens_used: u32,
}

/// 텍스트 생성 클라이언트 인터페이스
///
/// 테스트에서는 Mock 객체로 대체합니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AiClientTrait: Send + Sync {
    /// 프롬프트로 풀이를 생성합니다. 실패 시 재시도하지 않습니다.
    async fn generate(&self, spec: &PromptSpec) -> Result<Generation, AppError>;

    /// 실제 생성이 가능한 상태인지 여부
    fn is_configured(&self) -> bool;
}

/// Arc로 래핑된 AiClient (Clone 지원)
pub type AiClient = Arc<dyn AiClientTrait>;

/// 시작 시 한 번 설정을 읽어 클라이언트를 구성합니다.
///
/// API 키가 없으면 모든 호출이 실패하는 [`UnconfiguredClient`]를 돌려줍니다.
pub fn build_client(settings: &OpenAiSettings) -> AiClient {
    match settings.api_key.as_deref() {
        Some(api_key) => Arc::new(OpenAiClient::new(
            api_key,
            &settings.model,
            settings.timeout_seconds,
        )),
        None => {
            warn!("OpenAI API 키가 없어 생성 클라이언트를 비활성화합니다");
            Arc::new(UnconfiguredClient)
        }
    }
}

/// OpenAI API 클라이언트 구현체
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(api_key: &str, model: &str, timeout_seconds: u64) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key);
        Self {
            client: Client::with_config(config),
            model: model.to_string(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }
}

fn generation_failed(err: impl std::fmt::Display) -> AppError {
    AppError::GenerationFailed(err.to_string())
}

#[async_trait::async_trait]
impl AiClientTrait for OpenAiClient {
    async fn generate(&self, spec: &PromptSpec) -> Result<Generation, AppError> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(spec.system_instruction.as_str())
                .build()
                .map_err(generation_failed)?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(spec.user_instruction.as_str())
                .build()
                .map_err(generation_failed)?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .max_tokens(spec.token_budget)
            .temperature(TEMPERATURE)
            .build()
            .map_err(generation_failed)?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                generation_failed(format!(
                    "응답 시간({}초)을 초과했습니다",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(generation_failed)?;

        let tokens_used = response.usage.as_ref().map_or(0, |usage| usage.total_tokens);
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| generation_failed("생성된 응답이 비어 있습니다"))?;

        debug!(tokens_used, "풀이 생성 완료");
        Ok(Generation { text, tokens_used })
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// API 키가 없을 때 사용하는 클라이언트
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredClient;

#[async_trait::async_trait]
impl AiClientTrait for UnconfiguredClient {
    async fn generate(&self, _spec: &PromptSpec) -> Result<Generation, AppError> {
        Err(AppError::AiClientUnavailable)
    }

    fn is_configured(&self) -> bool {
        false
    }
}
