//! Analyze a food photo straight from disk
//!
//! Reads an image file, sends it through the configured vision model,
//! and prints the extracted recipe as JSON.
//!
//! Usage: cargo run --example analyze_file -- path/to/photo.jpg
//! (requires OPENROUTER_API_KEY to be set)

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::env;

use recipe_lens::{analyze_image, AppConfig, OpenRouterGateway};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .ok_or("Please provide an image path as an argument")?;

    let config = AppConfig::load()?;
    let gateway =
        OpenRouterGateway::from_config(&config).ok_or("OPENROUTER_API_KEY is not set")?;

    let image = tokio::fs::read(&path).await?;
    let encoded = STANDARD.encode(&image);

    let recipe = analyze_image(&gateway, &encoded).await?;
    println!("{}", serde_json::to_string_pretty(&recipe)?);

    Ok(())
}
