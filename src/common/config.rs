// src/common/config.rs
//! Runtime configuration read from the environment and CLI flags

use std::env;
use tracing::{info, warn};

const DEFAULT_DATABASE_URL: &str = "sqlite://bird_api.db";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEFAULT_LOG_BODY_LIMIT: usize = 16 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub reset_db: bool,
    pub log_bodies: bool,
    pub log_body_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
            reset_db: false,
            log_bodies: false,
            log_body_limit: DEFAULT_LOG_BODY_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database_url);

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!("Ignoring invalid PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => defaults.port,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| split_origins(&raw))
            .unwrap_or(defaults.cors_origins);

        let log_body_limit = env::var("LOG_BODY_LIMIT")
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .unwrap_or(defaults.log_body_limit);

        Self {
            database_url,
            port,
            cors_origins,
            reset_db: env_flag("RESET_DB"),
            log_bodies: env_flag("LOG_BODIES"),
            log_body_limit,
        }
    }

    /// Apply `--reset-db` / `--log-bodies` style flags on top of the environment
    pub fn apply_cli_overrides<I>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        for arg in args {
            match arg.as_str() {
                "--reset-db" => self.reset_db = true,
                "--log-bodies" => self.log_bodies = true,
                "--no-log-bodies" => self.log_bodies = false,
                _ => {}
            }
        }
        self
    }
}

/// Log the effective configuration at startup
pub fn log_startup_summary(config: &AppConfig) {
    info!(
        database_url = %config.database_url,
        port = config.port,
        cors_origins = ?config.cors_origins,
        "Configuration loaded"
    );
    if config.reset_db {
        warn!("RESET_DB enabled - existing tables will be dropped");
    }
    if config.log_bodies {
        info!(
            limit = config.log_body_limit,
            "Request/response body logging enabled"
        );
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|value| value.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let config = AppConfig::default().apply_cli_overrides(vec![
            "bird_api".to_string(),
            "--reset-db".to_string(),
            "--log-bodies".to_string(),
        ]);

        assert!(config.reset_db);
        assert!(config.log_bodies);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_split_origins_drops_blanks() {
        assert_eq!(
            split_origins(" http://a.test ,, http://b.test"),
            vec!["http://a.test", "http://b.test"]
        );
    }
}
