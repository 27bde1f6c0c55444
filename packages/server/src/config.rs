use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub kakao_api_key: String,
    pub natlib_cert_key: String,
    pub aladin_ttb_key: String,
    /// Optional: without it the AI recommendation widget stays empty.
    pub openai_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            kakao_api_key: env::var("KAKAO_API_KEY").context("KAKAO_API_KEY must be set")?,
            natlib_cert_key: env::var("NATLIB_CERT_KEY")
                .context("NATLIB_CERT_KEY must be set")?,
            aladin_ttb_key: env::var("ALADIN_TTB_KEY").context("ALADIN_TTB_KEY must be set")?,
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
        })
    }
}
