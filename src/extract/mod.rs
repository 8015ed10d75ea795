//! Two-stage recipe extraction from model completions.
//!
//! The strict stage looks for a JSON object (fenced block first, then a
//! first-`{`-to-last-`}` slice of the whole text). The fallback stage is a
//! line scanner that always synthesizes a usable recipe from whatever text
//! came back. Falling from one stage to the other is a designed branch,
//! invisible to callers.

mod json_block;
mod scan;

use log::debug;
use thiserror::Error;

use crate::model::Recipe;
use crate::normalize::{normalize, NormalizeError};

/// The completion could not be turned into a valid recipe.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A strict JSON candidate was found but failed validation.
    #[error(transparent)]
    Invalid(#[from] NormalizeError),
    /// The last-resort text scan produced an unusable recipe.
    #[error("fallback extraction failed: {0}")]
    FallbackFailed(String),
}

/// Extract a recipe from a raw model completion.
///
/// A strict JSON candidate that parses but fails validation (blank title,
/// empty lists) is an error; a completion with no usable JSON object at all
/// goes through the text scan instead, which only fails if its synthesized
/// recipe somehow does not survive normalization.
pub fn extract_recipe(raw_text: &str) -> Result<Recipe, ExtractError> {
    if let Some(draft) = json_block::strict_candidate(raw_text) {
        debug!("extracting recipe from strict JSON candidate");
        return Ok(normalize(draft)?);
    }

    debug!("no usable JSON object in completion, scanning text");
    let recipe = scan::scan_recipe(raw_text);
    normalize(recipe.into()).map_err(|err| ExtractError::FallbackFailed(err.to_string()))
}
