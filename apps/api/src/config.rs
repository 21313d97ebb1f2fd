use anyhow::{Context, Result};

const DEFAULT_ORACLE_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_ORACLE_MODEL: &str = "llama-3.3-70b-versatile";

/// Application configuration loaded from environment variables.
/// Fails at startup if the oracle API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub oracle_api_key: String,
    pub oracle_base_url: String,
    pub oracle_model: String,
    pub oracle_timeout_secs: u64,
    pub oracle_max_retries: u32,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding a built frontend. Served as a fallback route when set.
    pub static_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            oracle_api_key: require_env("ORACLE_API_KEY")
                .or_else(|_| require_env("GROQ_API_KEY"))
                .context("Set ORACLE_API_KEY (or GROQ_API_KEY)")?,
            oracle_base_url: env_or("ORACLE_BASE_URL", DEFAULT_ORACLE_BASE_URL),
            oracle_model: env_or("ORACLE_MODEL", DEFAULT_ORACLE_MODEL),
            oracle_timeout_secs: env_or("ORACLE_TIMEOUT_SECS", "120")
                .parse()
                .context("ORACLE_TIMEOUT_SECS must be a whole number of seconds")?,
            oracle_max_retries: env_or("ORACLE_MAX_RETRIES", "3")
                .parse()
                .context("ORACLE_MAX_RETRIES must be a non-negative integer")?,
            port: env_or("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            static_dir: std::env::var("STATIC_DIR").ok().filter(|d| !d.is_empty()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
