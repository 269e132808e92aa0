use crate::error::RulesError;
use crate::rules::{CompletionParams, Prompt, TextGenerator};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{debug, error};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for an OpenAI-compatible chat completions API.
///
/// `model` overrides the per-operation default carried in
/// [`CompletionParams`] when set.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: Option<String>,
}

impl OpenAiConfig {
    /// Reads `OPENAI_API_KEY` (required), `OPENAI_BASE_URL` and `OPENAI_MODEL`.
    pub fn load() -> Result<Self, RulesError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, RulesError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(RulesError::MissingApiKey)?;
        Ok(Self {
            api_key,
            base_url: lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup("OPENAI_MODEL").filter(|model| !model.trim().is_empty()),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

pub struct OpenAiClient {
    client: HttpClient,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, RulesError> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self { client, config })
    }

    /// The model used for `params`: the configured override, else the
    /// operation's default.
    pub fn model_for(&self, params: &CompletionParams) -> &str {
        self.config.model.as_deref().unwrap_or(params.default_model)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, prompt: &Prompt, params: CompletionParams) -> Result<String, RulesError> {
        let model = self.model_for(&params);
        let request = ChatRequest {
            model,
            messages: [
                ChatMessage {
                    role: "developer",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        debug!(model, max_tokens = params.max_tokens, "requesting completion");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "completion request failed");
            return Err(RulesError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(RulesError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_requires_api_key() {
        let err = OpenAiConfig::from_lookup(|_| None).err().unwrap();
        assert!(matches!(err, RulesError::MissingApiKey));
        let err = OpenAiConfig::from_lookup(|k| (k == "OPENAI_API_KEY").then(|| "  ".into()))
            .err()
            .unwrap();
        assert!(matches!(err, RulesError::MissingApiKey));
    }

    #[test]
    fn config_defaults() {
        let cfg = OpenAiConfig::from_lookup(|k| (k == "OPENAI_API_KEY").then(|| "sk-test".into()))
            .unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.model, None);
    }

    #[test]
    fn model_override_beats_operation_default() {
        let params = CompletionParams {
            max_tokens: 10,
            temperature: 0.5,
            default_model: "gpt-4o",
        };
        let cfg = OpenAiConfig {
            api_key: "k".into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: None,
        };
        let client = OpenAiClient::new(cfg.clone()).unwrap();
        assert_eq!(client.model_for(&params), "gpt-4o");

        let client = OpenAiClient::new(cfg.with_model("gpt-4.1-mini")).unwrap();
        assert_eq!(client.model_for(&params), "gpt-4.1-mini");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let cfg = OpenAiConfig {
            api_key: "k".into(),
            base_url: "http://localhost:9999/v1/".into(),
            model: Some("m".into()),
        };
        let client = OpenAiClient::new(cfg).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9999/v1/chat/completions");
    }
}
