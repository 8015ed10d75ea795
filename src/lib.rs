pub mod config;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod model;
pub mod normalize;
pub mod server;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, error};

pub use config::AppConfig;
pub use error::AnalyzeError;
pub use gateway::{OpenRouterGateway, VisionModel, RECIPE_PROMPT};
pub use model::Recipe;

/// Largest accepted image, measured in decoded bytes.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

// base64 inflates every 3 bytes of image data to 4 characters
const MAX_ENCODED_LEN: usize = MAX_IMAGE_BYTES / 3 * 4;

/// Validate and tidy an uploaded image payload.
///
/// Accepts either bare base64 or a full `data:*;base64,` URL, drops any
/// whitespace the client left in the encoding, and proves the result
/// decodes before anything is sent upstream.
pub fn clean_image_payload(raw: &str) -> Result<String, AnalyzeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalyzeError::EmptyImage);
    }

    // Browsers often send the canvas data URL wholesale
    let body = match trimmed.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => trimmed,
    };

    let cleaned: String = body.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(AnalyzeError::EmptyImage);
    }
    if cleaned.len() > MAX_ENCODED_LEN {
        return Err(AnalyzeError::ImageTooLarge {
            limit_bytes: MAX_IMAGE_BYTES,
        });
    }

    STANDARD.decode(&cleaned)?;

    Ok(cleaned)
}

/// Ask the vision model to describe the dish and parse its reply.
///
/// The reply is parsed strictly first and falls back to a line scan,
/// so any non-empty completion yields a recipe; an error here means the
/// image was rejected or the provider itself failed.
pub async fn analyze_image(
    gateway: &dyn VisionModel,
    image_base64: &str,
) -> Result<Recipe, AnalyzeError> {
    let image = clean_image_payload(image_base64)?;

    let completion = gateway.generate(&image, RECIPE_PROMPT).await?;
    debug!("{} completion: {completion}", gateway.provider_name());

    extract::extract_recipe(&completion).map_err(|err| {
        error!("failed to extract a recipe from the model reply: {err}");
        AnalyzeError::from(err)
    })
}
