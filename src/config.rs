//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TOKEN_FILE: &str = ".cv-session/tokens.json";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API root; endpoint paths are joined onto it
    pub api_base_url: String,
    /// Upper bound for every backend request
    pub request_timeout: Duration,
    /// Probe `auth/health/` before sending a registration
    pub health_probe: bool,
    /// Where the file-backed token store keeps the token pair
    pub token_store_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            health_probe: true,
            token_store_path: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; set but malformed ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let api_base_url = env::var("CV_API_BASE_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.api_base_url);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid("CV_API_BASE_URL", api_base_url));
        }

        let request_timeout = match env::var("CV_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::Invalid("CV_REQUEST_TIMEOUT_SECS", raw)),
            },
            Err(_) => defaults.request_timeout,
        };

        let health_probe = match env::var("CV_HEALTH_PROBE") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid("CV_HEALTH_PROBE", raw))?,
            Err(_) => defaults.health_probe,
        };

        let token_store_path = env::var("CV_TOKEN_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.token_store_path);

        Ok(Self {
            api_base_url,
            request_timeout,
            health_probe,
            token_store_path,
        })
    }

    /// Config for tests: short timeout, health probe on.
    pub fn test_default() -> Self {
        Self {
            api_base_url: "http://backend.test/api/".to_string(),
            request_timeout: Duration::from_secs(2),
            health_probe: true,
            token_store_path: env::temp_dir().join("cv-session-test-tokens.json"),
        }
    }

    /// Disable or enable the pre-registration health probe.
    pub fn with_health_probe(mut self, enabled: bool) -> Self {
        self.health_probe = enabled;
        self
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
