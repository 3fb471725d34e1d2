use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;

use crate::configuration::GenerationSettings;

/// A text-generation backend. Handles are shared across concurrent requests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        timeout: Duration,
    ) -> anyhow::Result<String>;
}

/// Chat-completions client for DeepSeek's OpenAI-compatible endpoint.
pub struct DeepSeekClient {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
    has_api_key: bool,
}

impl DeepSeekClient {
    pub fn new(api_key: String, settings: &GenerationSettings) -> Self {
        let has_api_key = !api_key.trim().is_empty();
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(settings.base_url.clone());

        // One attempt per call: rate limits surface as errors instead of retries.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        DeepSeekClient {
            client: Client::with_config(config).with_backoff(no_retry),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            has_api_key,
        }
    }
}

#[async_trait]
impl TextGenerator for DeepSeekClient {
    async fn generate(
        &self,
        prompt: &str,
        temperature: f32,
        timeout: Duration,
    ) -> anyhow::Result<String> {
        if !self.has_api_key {
            bail!("DeepSeek API key is not configured");
        }

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into()])
            .temperature(temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        let response = tokio::time::timeout(timeout, self.client.chat().create(request))
            .await
            .map_err(|_| anyhow!("generation timed out after {}s", timeout.as_secs()))?
            .context("chat completion request failed")?;
        log::debug!(
            "Generation usage for model {}: {:?}",
            self.model,
            response.usage
        );

        let content = response
            .choices
            .first()
            .ok_or_else(|| anyhow!("No choices in generation response"))?
            .message
            .content
            .clone()
            .ok_or_else(|| anyhow!("No content in generation response"))?;

        Ok(content)
    }
}
