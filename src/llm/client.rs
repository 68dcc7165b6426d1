use super::types::AnalysisRequest;
use crate::{Error, Result, config::LlmConfig};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::debug;

/// One request/response exchange with the hosted model.
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    async fn generate(&self, request: AnalysisRequest) -> Result<String>;
}

pub struct OpenAiGateway {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiGateway {
    pub fn new(config: LlmConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::config("LLM API key is empty"));
        }

        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url);
        }

        // Failures surface on the first attempt; async-openai retries rate limits otherwise.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        let client = Client::with_config(openai_config).with_backoff(no_retry);

        Ok(Self {
            client,
            model: config.model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl InferenceGateway for OpenAiGateway {
    async fn generate(&self, request: AnalysisRequest) -> Result<String> {
        debug!(
            "Generating content with model {} (prompt: {} chars, image: {})",
            self.model,
            request.prompt.len(),
            request
                .image
                .as_ref()
                .map(|i| i.mime_type.as_str())
                .unwrap_or("none")
        );

        let message = request.to_openai_message()?;

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder.model(&self.model).messages(vec![message]);

        if let Some(temperature) = self.temperature {
            request_builder.temperature(temperature);
        }

        if let Some(max_tokens) = self.max_tokens {
            request_builder.max_tokens(max_tokens);
        }

        let openai_request = request_builder.build()?;

        let response = self.client.chat().create(openai_request).await?;

        debug!(
            "Received completion response with {} choices",
            response.choices.len()
        );

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::llm("Model returned no text content"))
    }
}
