use log::debug;
use serde_json::Value;

use crate::model::RecipeDraft;

const REQUIRED_FIELDS: [&str; 3] = ["title", "ingredients", "instructions"];

/// Pull a strict JSON recipe candidate out of a completion, if one exists.
///
/// Models are asked to answer with JSON but routinely wrap it in prose or a
/// fenced code block. The candidate region is the first complete fenced block
/// when present, otherwise the whole text; within it, the span from the first
/// `{` to the last `}` is parsed. `None` means no usable object was found and
/// the caller should fall back to the text scan — a missing delimiter, a parse
/// failure, or a missing required field are all expected branches here, never
/// errors.
pub(super) fn strict_candidate(raw_text: &str) -> Option<RecipeDraft> {
    let candidate = fenced_block(raw_text).unwrap_or(raw_text);

    let start = candidate.find('{')?;
    let end = candidate.rfind('}')?;
    if end < start {
        return None;
    }

    let value: Value = match serde_json::from_str(&candidate[start..=end]) {
        Ok(value) => value,
        Err(err) => {
            debug!("completion span is not valid JSON: {err}");
            return None;
        }
    };

    let object = value.as_object()?;
    for field in REQUIRED_FIELDS {
        if object.get(field).map_or(true, Value::is_null) {
            debug!("parsed JSON object lacks `{field}`, falling back to text scan");
            return None;
        }
    }

    match serde_json::from_value(value) {
        Ok(draft) => Some(draft),
        Err(err) => {
            debug!("JSON object does not fit the recipe shape: {err}");
            None
        }
    }
}

/// Inner content of the first complete fenced code block, if any.
/// Tolerates a `json` language tag after the opening marker.
fn fenced_block(raw_text: &str) -> Option<&str> {
    let open = raw_text.find("```")?;
    let body = &raw_text[open + 3..];
    let body = body.strip_prefix("json").unwrap_or(body);
    let close = body.find("```")?;
    Some(&body[..close])
}
