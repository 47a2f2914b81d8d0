//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::path::PathBuf;

use chrono::TimeDelta;

use crate::constants::{
    DEFAULT_CLIENT_IP_HEADER, DEFAULT_CORS_ALLOW_ORIGIN, DEFAULT_DATABASE_MAX_CONNECTIONS,
    DEFAULT_RATE_LIMIT_WINDOW_SECS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_STATIC_DIR,
    MAX_RATE_LIMIT_WINDOW_SECS,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub http: HttpConfig,
    pub rate_limit: RateLimitConfig,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// HTTP surface configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Directory served for every request that is not an API route
    pub static_dir: PathBuf,
    /// Header holding the original client address when behind a proxy
    pub client_ip_header: String,
    /// Value of `Access-Control-Allow-Origin`
    pub cors_allow_origin: String,
}

/// Submission rate limiting
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub window_secs: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            http: HttpConfig::from_env(),
            rate_limit: RateLimitConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT")
                .map(|value| LogFormat::parse(&value))
                .unwrap_or(Ok(LogFormat::Text))?,
        })
    }
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue("LOG_FORMAT".to_string())),
        }
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl HttpConfig {
    fn from_env() -> Self {
        Self {
            static_dir: PathBuf::from(
                env::var("STATIC_DIR").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string()),
            ),
            client_ip_header: env::var("CLIENT_IP_HEADER")
                .unwrap_or_else(|_| DEFAULT_CLIENT_IP_HEADER.to_string()),
            cors_allow_origin: env::var("CORS_ALLOW_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_CORS_ALLOW_ORIGIN.to_string()),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            client_ip_header: DEFAULT_CLIENT_IP_HEADER.to_string(),
            cors_allow_origin: DEFAULT_CORS_ALLOW_ORIGIN.to_string(),
        }
    }
}

impl RateLimitConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| DEFAULT_RATE_LIMIT_WINDOW_SECS.to_string());

        Ok(Self {
            window_secs: Self::parse_window_secs(&raw)?,
        })
    }

    /// Accepts whole seconds in `0..=MAX_RATE_LIMIT_WINDOW_SECS`
    fn parse_window_secs(raw: &str) -> Result<i64, ConfigError> {
        let invalid = || ConfigError::InvalidValue("RATE_LIMIT_WINDOW_SECS".to_string());

        let window_secs = raw.trim().parse::<i64>().map_err(|_| invalid())?;
        if !(0..=MAX_RATE_LIMIT_WINDOW_SECS).contains(&window_secs) {
            return Err(invalid());
        }
        TimeDelta::try_seconds(window_secs).ok_or_else(invalid)?;

        Ok(window_secs)
    }

    /// The window as a chrono duration, saturating for out-of-range values
    pub fn window(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.window_secs).unwrap_or(TimeDelta::MAX)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_RATE_LIMIT_WINDOW_SECS,
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let http = HttpConfig::default();
        assert_eq!(http.static_dir, PathBuf::from("public"));
        assert_eq!(http.client_ip_header, "CF-Connecting-IP");
        assert_eq!(http.cors_allow_origin, "*");

        let rate_limit = RateLimitConfig::default();
        assert_eq!(rate_limit.window(), chrono::Duration::minutes(5));
    }

    #[test]
    fn test_rate_limit_window_bounds() {
        assert_eq!(RateLimitConfig::parse_window_secs("300").unwrap(), 300);
        assert_eq!(RateLimitConfig::parse_window_secs("0").unwrap(), 0);
        assert_eq!(
            RateLimitConfig::parse_window_secs(&MAX_RATE_LIMIT_WINDOW_SECS.to_string()).unwrap(),
            MAX_RATE_LIMIT_WINDOW_SECS
        );

        let just_over = (MAX_RATE_LIMIT_WINDOW_SECS + 1).to_string();
        for raw in ["-1", "five", "9000000000000000000", just_over.as_str()] {
            assert!(matches!(
                RateLimitConfig::parse_window_secs(raw),
                Err(ConfigError::InvalidValue(name)) if name == "RATE_LIMIT_WINDOW_SECS"
            ));
        }

        let oversized = RateLimitConfig {
            window_secs: 9_000_000_000_000_000,
        };
        assert_eq!(oversized.window(), TimeDelta::MAX);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::parse("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON ").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse("text").unwrap(), LogFormat::Text);
        assert_eq!(LogFormat::parse("").unwrap(), LogFormat::Text);
        assert!(matches!(
            LogFormat::parse("xml"),
            Err(ConfigError::InvalidValue(name)) if name == "LOG_FORMAT"
        ));
    }
}
