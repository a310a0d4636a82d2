use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the game service.
    pub backend_host: String,
    /// Public URL of the web client, used to build shareable join links.
    pub public_url: String,
    pub request_timeout_seconds: u64,
    pub log_directory: PathBuf,
    pub log_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            backend_host: env::var("BEE_BACKEND_HOST")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string()),
            public_url: env::var("BEE_PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            request_timeout_seconds: parse_var("BEE_REQUEST_TIMEOUT_SECONDS", "10")?,
            log_directory: env::var("BEE_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            log_file: env::var("BEE_LOG_FILE").unwrap_or_else(|_| "bee-genius.log".to_string()),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Link other players can open to join `game_code`.
    pub fn share_link(&self, game_code: &str) -> String {
        format!("{}/game/{}", self.public_url.trim_end_matches('/'), game_code)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_host: "http://127.0.0.1:8080".to_string(),
            public_url: "http://localhost:3000".to_string(),
            request_timeout_seconds: 10,
            log_directory: PathBuf::from("."),
            log_file: "bee-genius.log".to_string(),
        }
    }
}

fn parse_var(name: &'static str, default: &str) -> Result<u64, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_link() {
        let config = Config {
            public_url: "https://bee.example.com/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.share_link("HIVE"), "https://bee.example.com/game/HIVE");
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(Config::default().request_timeout(), Duration::from_secs(10));
    }
}
