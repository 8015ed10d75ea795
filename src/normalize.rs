use thiserror::Error;

use crate::model::{OneOrMany, Recipe, RecipeDraft, TextOrNumber};

/// A candidate was missing (or left empty) one of the required fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("recipe candidate has no usable `{field}` field")]
pub struct NormalizeError {
    pub field: &'static str,
}

/// Turn a loosely-shaped candidate into a valid [`Recipe`].
///
/// `title` must be non-empty; `ingredients` and `instructions` are coerced
/// from bare scalars into one-element lists and must be non-empty afterwards.
/// Optional fields pass through untouched. Normalizing an already-normalized
/// recipe changes nothing.
pub fn normalize(draft: RecipeDraft) -> Result<Recipe, NormalizeError> {
    let title = draft
        .title
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .ok_or(NormalizeError { field: "title" })?;

    let ingredients = coerce_lines(draft.ingredients, "ingredients")?;
    let instructions = coerce_lines(draft.instructions, "instructions")?;

    Ok(Recipe {
        title,
        description: draft.description,
        ingredients,
        instructions,
        prep_time: draft.prep_time.map(TextOrNumber::into_text),
        cook_time: draft.cook_time.map(TextOrNumber::into_text),
        servings: draft.servings.map(TextOrNumber::into_text),
        difficulty: draft.difficulty.map(TextOrNumber::into_text),
    })
}

fn coerce_lines(
    field: Option<OneOrMany>,
    name: &'static str,
) -> Result<Vec<String>, NormalizeError> {
    let lines = field.map(OneOrMany::into_lines).unwrap_or_default();
    if lines.is_empty() {
        return Err(NormalizeError { field: name });
    }
    Ok(lines)
}
