use thiserror::Error;

use crate::extract::ExtractError;
use crate::gateway::GatewayError;

/// Errors that can occur while analyzing an uploaded food image
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The request carried no image data
    #[error("no image data provided")]
    EmptyImage,

    /// The encoded image exceeds the accepted size
    #[error("image exceeds the {limit_bytes} byte limit")]
    ImageTooLarge { limit_bytes: usize },

    /// The image payload is not valid base64
    #[error("image payload is not valid base64: {0}")]
    InvalidImageEncoding(#[from] base64::DecodeError),

    /// No API key is configured for the model provider
    #[error("model provider credential is not configured")]
    MissingCredential,

    /// The model provider could not be reached or rejected the request
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The model reply could not be turned into a recipe
    #[error(transparent)]
    Extract(#[from] ExtractError),
}
