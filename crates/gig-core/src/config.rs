//! Configuration types and loading
//!
//! Everything is env-driven with sensible defaults so the server can boot in
//! development without a config file.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT secret for token signing
    pub jwt_secret: String,
    /// Token expiration in seconds
    pub token_expiration_seconds: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/gigsly".into(),
                max_connections: 10,
                min_connections: 2,
                connect_timeout_secs: 30,
            },
            auth: AuthConfig {
                jwt_secret: "change-me-in-production".into(),
                token_expiration_seconds: 24 * 60 * 60,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: ServerConfig {
                host: env_or("SERVER_HOST", defaults.server.host),
                port: env_parsed("SERVER_PORT", defaults.server.port),
            },
            database: DatabaseConfig {
                url: env_or("DATABASE_URL", defaults.database.url),
                max_connections: env_parsed("DB_MAX_CONNECTIONS", defaults.database.max_connections),
                min_connections: env_parsed("DB_MIN_CONNECTIONS", defaults.database.min_connections),
                connect_timeout_secs: env_parsed(
                    "DB_CONNECT_TIMEOUT",
                    defaults.database.connect_timeout_secs,
                ),
            },
            auth: AuthConfig {
                jwt_secret: env_or("JWT_SECRET", defaults.auth.jwt_secret),
                token_expiration_seconds: env_parsed(
                    "JWT_EXPIRATION_SECONDS",
                    defaults.auth.token_expiration_seconds,
                ),
            },
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
