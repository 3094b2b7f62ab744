//! Text-generation client for the exam chat feature.
//!
//! Wraps the OpenAI-compatible chat completions API (pointed at Gemini's
//! compatibility endpoint by default) behind a small trait so the chat
//! service can be tested without network access.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use secrecy::ExposeSecret;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerationClient: Send + Sync {
    /// Whether credentials are present. When false, `generate` must not be
    /// called and the caller answers 503 instead.
    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Production client backed by `async-openai`.
///
/// Built with no inner client when `AI_API_KEY` is absent, so a misconfigured
/// deployment still boots and serves everything except chat.
pub struct OpenAiModelService {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiModelService {
    pub fn from_config(config: &Config) -> Self {
        let client = config.ai_api_key.as_ref().map(|key| {
            let openai_config = OpenAIConfig::new()
                .with_api_key(key.expose_secret())
                .with_api_base(&config.ai_api_base);
            Client::with_config(openai_config)
        });

        Self {
            client,
            model: config.ai_model.clone(),
        }
    }
}

#[async_trait]
impl TextGenerationClient for OpenAiModelService {
    fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let client = self.client.as_ref().ok_or_else(AppError::api_key_missing)?;

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| AppError::from_ai_failure(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![message.into()])
            .build()
            .map_err(|e| AppError::from_ai_failure(e.to_string()))?;

        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| AppError::from_ai_failure(e.to_string()))?;

        // An empty completion is not an error here; the response parser folds
        // whatever came back into the explanation field.
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
