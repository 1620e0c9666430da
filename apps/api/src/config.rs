use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::search::DEFAULT_RESULT_LIMIT;
use crate::session::DEFAULT_IDLE_TTL;

/// Application configuration loaded from environment variables.
/// Startup fails if either secret is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub team_password: String,
    pub gemini_base_url: String,
    pub search_region: String,
    pub search_result_limit: usize,
    pub session_idle_ttl: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_idle_minutes = positive_count(
            "SESSION_IDLE_MINUTES",
            std::env::var("SESSION_IDLE_MINUTES").ok(),
            DEFAULT_IDLE_TTL.as_secs() / 60,
        )?;

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            team_password: require_env("TEAM_PASSWORD")?,
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            search_region: std::env::var("SEARCH_REGION").unwrap_or_else(|_| "kr-kr".to_string()),
            search_result_limit: positive_count(
                "SEARCH_RESULT_LIMIT",
                std::env::var("SEARCH_RESULT_LIMIT").ok(),
                DEFAULT_RESULT_LIMIT as u64,
            )? as usize,
            session_idle_ttl: Duration::from_secs(session_idle_minutes * 60),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses an optional setting that must be at least 1.
fn positive_count(key: &str, raw: Option<String>, default: u64) -> Result<u64> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("{key} must be a positive integer"))?;
    if value == 0 {
        bail!("{key} must be a positive integer");
    }
    Ok(value)
}
