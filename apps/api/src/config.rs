use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::outreach::models::SenderProfile;

const DEFAULT_SENDER_NAME: &str = "Mohan";
const DEFAULT_SENDER_COMPANY: &str = "AtliQ";
const DEFAULT_SENDER_PITCH: &str = "an AI & Software Consulting company dedicated to facilitating \
    the seamless integration of business processes through automated tools. \
    We have empowered numerous enterprises with tailored solutions, fostering scalability, \
    process optimization, cost reduction, and heightened overall efficiency.";

/// Application configuration loaded from environment variables.
/// Only the Anthropic key is mandatory; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// When set, the portfolio is served from PostgreSQL instead of the CSV file.
    pub database_url: Option<String>,
    pub portfolio_csv: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub fetch_timeout_secs: u64,
    /// Page text beyond this many characters is cut before it reaches the model.
    pub max_page_chars: usize,
    pub sender: SenderProfile,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            database_url: optional_env("DATABASE_URL"),
            portfolio_csv: optional_env("PORTFOLIO_CSV")
                .unwrap_or_else(|| "my_portfolio.csv".to_string())
                .into(),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            fetch_timeout_secs: parse_env("FETCH_TIMEOUT_SECS", 30)
                .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            max_page_chars: parse_env("MAX_PAGE_CHARS", 24_000)
                .context("MAX_PAGE_CHARS must be a positive integer")?,
            sender: SenderProfile {
                name: optional_env("SENDER_NAME").unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string()),
                company: optional_env("SENDER_COMPANY")
                    .unwrap_or_else(|| DEFAULT_SENDER_COMPANY.to_string()),
                pitch: optional_env("SENDER_PITCH")
                    .unwrap_or_else(|| DEFAULT_SENDER_PITCH.to_string()),
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}
