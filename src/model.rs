use serde::{Deserialize, Serialize};

/// A structured recipe produced from one image analysis.
///
/// Values that escape the extraction pipeline always satisfy the schema
/// invariants: non-empty `title`, non-empty `ingredients` and `instructions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(rename = "prepTime", default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(rename = "cookTime", default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// A recipe candidate as the model tends to emit it, before validation.
///
/// Everything is optional and loosely shaped; [`crate::normalize::normalize`]
/// turns a draft into a guaranteed-valid [`Recipe`] or rejects it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecipeDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<OneOrMany>,
    pub instructions: Option<OneOrMany>,
    #[serde(rename = "prepTime")]
    pub prep_time: Option<TextOrNumber>,
    #[serde(rename = "cookTime")]
    pub cook_time: Option<TextOrNumber>,
    pub servings: Option<TextOrNumber>,
    pub difficulty: Option<TextOrNumber>,
}

/// A field the model may emit as a single string or as a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Flatten into trimmed, non-empty lines, preserving order.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            OneOrMany::One(line) => {
                let line = line.trim();
                if line.is_empty() {
                    Vec::new()
                } else {
                    vec![line.to_string()]
                }
            }
            OneOrMany::Many(lines) => lines
                .into_iter()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .collect(),
        }
    }
}

/// A free-text scalar the model sometimes emits as a bare number
/// (`"servings": 4` instead of `"servings": "4 servings"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    pub fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }
    }
}

impl From<Recipe> for RecipeDraft {
    fn from(recipe: Recipe) -> Self {
        RecipeDraft {
            title: Some(recipe.title),
            description: recipe.description,
            ingredients: Some(OneOrMany::Many(recipe.ingredients)),
            instructions: Some(OneOrMany::Many(recipe.instructions)),
            prep_time: recipe.prep_time.map(TextOrNumber::Text),
            cook_time: recipe.cook_time.map(TextOrNumber::Text),
            servings: recipe.servings.map(TextOrNumber::Text),
            difficulty: recipe.difficulty.map(TextOrNumber::Text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe {
            title: "Shakshuka".to_string(),
            description: Some("Eggs poached in spiced tomato sauce".to_string()),
            ingredients: vec!["4 eggs".to_string(), "1 can tomatoes".to_string()],
            instructions: vec!["Simmer the sauce".to_string(), "Crack in the eggs".to_string()],
            prep_time: Some("10 minutes".to_string()),
            cook_time: Some("20 minutes".to_string()),
            servings: Some("2 servings".to_string()),
            difficulty: Some("Easy".to_string()),
        }
    }

    #[test]
    fn recipe_serializes_with_camel_case_time_fields() {
        let json = serde_json::to_value(sample_recipe()).unwrap();

        assert_eq!(json["prepTime"], "10 minutes");
        assert_eq!(json["cookTime"], "20 minutes");
        assert!(json.get("prep_time").is_none());
    }

    #[test]
    fn recipe_omits_absent_optional_fields() {
        let recipe = Recipe {
            description: None,
            difficulty: None,
            ..sample_recipe()
        };

        let json = serde_json::to_value(recipe).unwrap();

        assert!(json.get("description").is_none());
        assert!(json.get("difficulty").is_none());
        assert_eq!(json["title"], "Shakshuka");
    }

    #[test]
    fn draft_accepts_scalar_and_list_fields() {
        let draft: RecipeDraft = serde_json::from_str(
            r#"{"title":"Toast","ingredients":"bread","instructions":["toast it"],"servings":4}"#,
        )
        .unwrap();

        assert_eq!(draft.ingredients.unwrap().into_lines(), vec!["bread"]);
        assert_eq!(draft.instructions.unwrap().into_lines(), vec!["toast it"]);
        assert_eq!(draft.servings.unwrap().into_text(), "4");
    }

    #[test]
    fn into_lines_drops_blank_entries() {
        let lines = OneOrMany::Many(vec![
            "  flour ".to_string(),
            String::new(),
            "   ".to_string(),
            "sugar".to_string(),
        ])
        .into_lines();

        assert_eq!(lines, vec!["flour", "sugar"]);
    }
}
