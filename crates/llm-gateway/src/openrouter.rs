//! HTTP client generator for the OpenRouter chat-completions API.

use crate::error::{GatewayError, Result};
use crate::traits::TextGenerator;
use crate::types::GenerationRequest;
use async_trait::async_trait;

const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_MODEL: &str = "qwen/qwen3-4b:free";

pub struct OpenRouterGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenRouterGenerator {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GatewayError::Http(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl TextGenerator for OpenRouterGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        #[derive(serde::Serialize)]
        struct Message<'a> {
            role: &'a str,
            content: &'a str,
        }
        #[derive(serde::Serialize)]
        struct Body<'a> {
            model: &'a str,
            messages: Vec<Message<'a>>,
            max_tokens: u32,
        }

        let body = Body {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.system_message,
                },
                Message {
                    role: "user",
                    content: &request.user_message,
                },
            ],
            max_tokens: request.max_tokens,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", "http://localhost:5000")
            .header("X-Title", "Garage Booking Assistant")
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(GatewayError::Http(format!(
                "openrouter: HTTP {}",
                resp.status()
            )));
        }

        // Expected response: { choices: [{ message: { content } }] }
        #[derive(serde::Deserialize)]
        struct RespMessage {
            content: String,
        }
        #[derive(serde::Deserialize)]
        struct Choice {
            message: RespMessage,
        }
        #[derive(serde::Deserialize)]
        struct RespBody {
            choices: Vec<Choice>,
        }

        let parsed: RespBody = resp
            .json()
            .await
            .map_err(|e| GatewayError::Provider(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(GatewayError::EmptyCompletion)?;

        tracing::debug!(chars = content.len(), "openrouter completion received");
        Ok(content)
    }
}
