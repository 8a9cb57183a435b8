use crate::error::{AppError, Result};

pub const API_FOOTBALL_URL: &str = "https://v3.football.api-sports.io";
pub const API_FOOTBALL_HOST: &str = "v3.football.api-sports.io";

/// HTTP client timeout for API-Football requests (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 30;

/// Rows inserted by the sample loader when no count is given.
pub const DEFAULT_SAMPLE_COUNT: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_football_url: String,
    /// API-Football key (API_FOOTBALL_KEY). Fetching is refused without it;
    /// everything else works offline.
    pub api_football_key: Option<String>,
    pub log_level: String,
    pub db_path: String,
    pub api_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_football_url: std::env::var("API_FOOTBALL_URL")
                .unwrap_or_else(|_| API_FOOTBALL_URL.to_string()),
            api_football_key: std::env::var("API_FOOTBALL_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "matches.db".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
        })
    }
}
