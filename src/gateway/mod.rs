mod openrouter;
mod prompt;

pub use openrouter::OpenRouterGateway;
pub use prompt::RECIPE_PROMPT;

use async_trait::async_trait;
use thiserror::Error;

/// A vision-capable chat-completion backend.
///
/// One narrow seam between the pipeline and the outside world: a single-turn
/// multimodal request goes out, the raw completion text comes back. Keeping
/// the seam this small lets the extraction core run against canned text in
/// tests.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Get the provider name (e.g., "openrouter")
    fn provider_name(&self) -> &str;

    /// Send one prompt + base64 image request and return the raw completion.
    /// No retries; every failure surfaces immediately.
    async fn generate(&self, image_base64: &str, prompt: &str) -> Result<String, GatewayError>;
}

/// Ways the provider call can fail, kept distinguishable for the handler.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never completed (connect, TLS, body read/decode).
    #[error("request to model provider failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The provider answered with a non-success status.
    #[error("model provider returned status {status}: {message}")]
    Api { status: u16, message: String },
    /// A success reply without `choices[0].message.content`.
    #[error("model response did not contain a completion")]
    MissingCompletion,
}
