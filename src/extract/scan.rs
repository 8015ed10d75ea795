use crate::model::Recipe;

const FALLBACK_TITLE: &str = "Delicious Recipe";
const FALLBACK_DESCRIPTION: &str = "Recipe generated from image analysis";
const FALLBACK_PREP_TIME: &str = "30 minutes";
const FALLBACK_COOK_TIME: &str = "30 minutes";
const FALLBACK_SERVINGS: &str = "4 servings";
const FALLBACK_DIFFICULTY: &str = "Medium";
const NO_INGREDIENTS: &str = "Ingredients not clearly specified";
const NO_INSTRUCTIONS: &str = "Instructions not clearly specified";

const TITLE_LABELS: [&str; 3] = ["title:", "dish:", "recipe:"];
const INSTRUCTION_HEADERS: [&str; 3] = ["instructions", "directions", "steps"];

/// Build a recipe from unstructured completion text. Never fails.
///
/// One pass over the trimmed, non-empty lines with two mutually-exclusive
/// section flags. Header lines toggle the flags and are consumed; collected
/// lines get their list/step markers stripped and exact duplicates dropped.
/// Whatever the scan cannot find is filled in with fixed placeholders, so the
/// result is always structurally valid.
pub(super) fn scan_recipe(raw_text: &str) -> Recipe {
    let lines: Vec<&str> = raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let (mut ingredients, mut instructions) = collect_sections(&lines);
    if ingredients.is_empty() {
        ingredients.push(NO_INGREDIENTS.to_string());
    }
    if instructions.is_empty() {
        instructions.push(NO_INSTRUCTIONS.to_string());
    }

    Recipe {
        title: pick_title(&lines),
        description: Some(FALLBACK_DESCRIPTION.to_string()),
        ingredients,
        instructions,
        prep_time: Some(FALLBACK_PREP_TIME.to_string()),
        cook_time: Some(FALLBACK_COOK_TIME.to_string()),
        servings: Some(FALLBACK_SERVINGS.to_string()),
        difficulty: Some(FALLBACK_DIFFICULTY.to_string()),
    }
}

fn collect_sections(lines: &[&str]) -> (Vec<String>, Vec<String>) {
    let mut ingredients = Vec::new();
    let mut instructions = Vec::new();
    let mut in_ingredients = false;
    let mut in_instructions = false;

    for line in lines {
        if contains_ignore_ascii_case(line, "ingredients") {
            in_ingredients = true;
            in_instructions = false;
            continue;
        }
        if INSTRUCTION_HEADERS
            .iter()
            .any(|header| contains_ignore_ascii_case(line, header))
        {
            in_instructions = true;
            in_ingredients = false;
            continue;
        }

        // Marker-prefixed lines count as ingredients wherever they appear;
        // the section flag only widens what gets collected.
        if in_ingredients || has_list_marker(line) {
            push_unique(&mut ingredients, strip_list_marker(line));
        }
        if in_instructions || has_step_marker(line) {
            push_unique(&mut instructions, clean_instruction(line));
        }
    }

    (ingredients, instructions)
}

/// First `title:`/`dish:`/`recipe:` labelled line wins; otherwise the first
/// line, provided it does not look like a label itself; otherwise a fixed
/// placeholder.
fn pick_title(lines: &[&str]) -> String {
    for line in lines {
        if let Some(title) = labeled_title(line) {
            return title;
        }
    }
    match lines.first() {
        Some(first) if !first.contains(':') => (*first).to_string(),
        _ => FALLBACK_TITLE.to_string(),
    }
}

fn labeled_title(line: &str) -> Option<String> {
    for label in TITLE_LABELS {
        if let Some(at) = find_ignore_ascii_case(line, label) {
            let value = line[at + label.len()..].trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().map(|(at, _)| at).find(|&at| {
        haystack[at..]
            .get(..needle.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(needle))
    })
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    find_ignore_ascii_case(haystack, needle).is_some()
}

/// `-`/`•`/`*` bullets, or leading digits followed by `.`, `)` or whitespace.
fn has_list_marker(line: &str) -> bool {
    match line.chars().next() {
        Some('-' | '•' | '*') => true,
        Some(digit) if digit.is_ascii_digit() => {
            let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
            rest.starts_with(['.', ')']) || rest.starts_with(char::is_whitespace)
        }
        _ => false,
    }
}

fn strip_list_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix(['-', '•', '*']) {
        return rest.trim_start();
    }
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix(['.', ')']) {
            return rest.trim_start();
        }
        if rest.starts_with(char::is_whitespace) {
            return rest.trim_start();
        }
    }
    line
}

fn has_step_marker(line: &str) -> bool {
    step_marker_len(line).is_some()
}

/// Byte length of a leading `step N` marker, if the line starts with one.
fn step_marker_len(line: &str) -> Option<usize> {
    let head = line.get(..4)?;
    if !head.eq_ignore_ascii_case("step") {
        return None;
    }
    let rest = &line[4..];
    let after_spaces = rest.trim_start();
    let spaces = rest.len() - after_spaces.len();
    let digits = after_spaces.len()
        - after_spaces
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .len();
    if digits == 0 {
        return None;
    }
    Some(4 + spaces + digits)
}

fn strip_step_marker(line: &str) -> &str {
    match step_marker_len(line) {
        Some(len) => {
            let rest = &line[len..];
            let rest = rest.strip_prefix([':', '.', ')']).unwrap_or(rest);
            rest.trim_start()
        }
        None => line,
    }
}

fn clean_instruction(line: &str) -> &str {
    if has_step_marker(line) {
        strip_step_marker(line)
    } else {
        strip_list_marker(line)
    }
}

fn push_unique(lines: &mut Vec<String>, candidate: &str) {
    if candidate.is_empty() {
        return;
    }
    if lines.iter().any(|line| line == candidate) {
        return;
    }
    lines.push(candidate.to_string());
}
