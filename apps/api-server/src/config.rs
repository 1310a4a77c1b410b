//! Application configuration loaded from environment variables.

use std::env;

use blogpost_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server over the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    /// Runtime configuration: `HOST`, `PORT`, `DATABASE_URL`.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database: Self::database_from_env("DATABASE_URL"),
        }
    }

    /// Test configuration: `TEST_DATABASE_URL` on an ephemeral local port.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database: Self::database_from_env("TEST_DATABASE_URL"),
        }
    }

    fn database_from_env(url_var: &str) -> Option<DatabaseConfig> {
        let url = env::var(url_var).ok().filter(|u| !u.trim().is_empty())?;
        let mut config = DatabaseConfig::new(url);

        if let Some(max) = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.max_connections = max;
        }
        if let Some(min) = env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.min_connections = min;
        }

        Some(config)
    }
}
