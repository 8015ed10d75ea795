use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Runtime configuration for the recipe analysis service
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// OpenRouter API key (can also be set via the OPENROUTER_API_KEY
    /// environment variable)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier routed through OpenRouter (e.g., "openai/gpt-4o-mini")
    #[serde(default = "default_model")]
    pub model: String,
    /// Public site URL sent as the HTTP-Referer header, if any
    #[serde(default)]
    pub site_url: Option<String>,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Address the HTTP server binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            site_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            listen_addr: default_listen_addr(),
        }
    }
}

// Default value functions
fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

/// Pick the API key to use, treating blank values as unset.
fn resolve_api_key(configured: Option<String>, ambient: Option<String>) -> Option<String> {
    configured
        .filter(|key| !key.trim().is_empty())
        .or_else(|| ambient.filter(|key| !key.trim().is_empty()))
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_LENS__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_LENS__API_KEY
    ///
    /// When no key is configured through either source, the conventional
    /// OPENROUTER_API_KEY variable is consulted as a fallback.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Environment variables with RECIPE_LENS__ prefix
        .add_source(
            Environment::with_prefix("RECIPE_LENS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;
    config.api_key = resolve_api_key(config.api_key.take(), env::var("OPENROUTER_API_KEY").ok());
    Ok(config)
}
