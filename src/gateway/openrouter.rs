use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::AppConfig;
use crate::gateway::{GatewayError, VisionModel};

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai";
const APP_TITLE: &str = "recipe-lens";

/// OpenRouter-backed [`VisionModel`].
///
/// Speaks the OpenAI-compatible chat-completions dialect with the image
/// inlined as a data URI. The `X-Title` header identifies this app to the
/// router; `HTTP-Referer` is added when a public site URL is configured.
pub struct OpenRouterGateway {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    site_url: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl OpenRouterGateway {
    /// Create a gateway from resolved configuration.
    /// Returns `None` when no credential is configured.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;

        Some(OpenRouterGateway {
            client: Client::new(),
            api_key,
            base_url: OPENROUTER_BASE_URL.to_string(),
            model: config.model.clone(),
            site_url: config.site_url.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenRouterGateway {
            client: Client::new(),
            api_key,
            base_url,
            model,
            site_url: None,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl VisionModel for OpenRouterGateway {
    fn provider_name(&self) -> &str {
        "openrouter"
    }

    async fn generate(&self, image_base64: &str, prompt: &str) -> Result<String, GatewayError> {
        let data_url = format!("data:image/jpeg;base64,{image_base64}");

        let mut request = self
            .client
            .post(format!("{}/api/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("X-Title", APP_TITLE);
        if let Some(site_url) = &self.site_url {
            request = request.header("HTTP-Referer", site_url);
        }

        let response = request
            .json(&json!({
                "model": self.model,
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": prompt},
                        {"type": "image_url", "image_url": {"url": data_url}}
                    ]
                }],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(GatewayError::Api { status, message });
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        response_body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or(GatewayError::MissingCompletion)
    }
}
