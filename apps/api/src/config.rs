use anyhow::{Context, Result};

const DEFAULT_FALLBACK_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_FALLBACK_MODEL: &str = "llama-3.1-8b-instant";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub fallback_api_key: String,
    pub fallback_api_url: String,
    pub fallback_model: String,
    /// Allowed browser origin for the portal frontend. Permissive when unset.
    pub cors_origin: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            fallback_api_key: require_env("FALLBACK_API_KEY")?,
            fallback_api_url: std::env::var("FALLBACK_API_URL")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_API_URL.to_string()),
            fallback_model: std::env::var("FALLBACK_MODEL")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_MODEL.to_string()),
            cors_origin: std::env::var("CORS_ORIGIN").ok().filter(|s| !s.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
