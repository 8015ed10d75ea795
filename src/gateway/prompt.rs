/// The prompt sent alongside every food photo.
///
/// It instructs the model to identify the dish and answer with a single
/// JSON object using the exact field names the extraction pipeline
/// expects. Models ignore this often enough that the pipeline never
/// trusts the reply shape; the prompt just raises the odds of a clean
/// strict JSON parse.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const RECIPE_PROMPT: &str = include_str!("prompt.txt");
