//! Environment-driven process configuration.
//!
//! Everything except `DATABASE_URL` has a default; unparsable numeric values
//! silently fall back to the default, matching the behaviour operators expect
//! from the rest of the fleet.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent.
    #[error("{name} environment variable is required")]
    Missing {
        /// Variable name.
        name: &'static str,
    },
}

/// Resolved process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name this service advertises; access grants are checked against it.
    pub service_name: String,
    /// API key used to authenticate against the auth service.
    pub app_api_key: String,
    /// HTTP bind host.
    pub http_host: String,
    /// HTTP bind port.
    pub http_port: u16,
    /// gRPC bind host.
    pub grpc_host: String,
    /// gRPC bind port.
    pub grpc_port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum open database connections.
    pub db_max_connections: u32,
    /// Minimum idle database connections.
    pub db_min_idle: u32,
    /// Database checkout timeout.
    pub db_connect_timeout: Duration,
    /// Auth service gRPC address; `None` disables access validation.
    pub auth_grpc_addr: Option<String>,
    /// Grace period for draining in-flight requests at shutdown.
    pub shutdown_grace: Duration,
}

fn env_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_owned(),
    }
}

fn parsed_env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").unwrap_or_default();
        if database_url.is_empty() {
            return Err(ConfigError::Missing {
                name: "DATABASE_URL",
            });
        }

        let auth_grpc_addr = env::var("AUTH_SERVICE_GRPC_ADDR")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            service_name: env_or("APP_SERVICE_NAME", "profile-service"),
            app_api_key: env_or("APP_API_KEY", ""),
            http_host: env_or("HTTP_HOST", "0.0.0.0"),
            http_port: parsed_env_or("HTTP_PORT", 8080),
            grpc_host: env_or("GRPC_HOST", "0.0.0.0"),
            grpc_port: parsed_env_or("GRPC_PORT", 9090),
            database_url,
            db_max_connections: parsed_env_or("DB_MAX_CONNECTIONS", 10),
            db_min_idle: parsed_env_or("DB_MIN_IDLE", 2),
            db_connect_timeout: Duration::from_secs(parsed_env_or("DB_CONNECT_TIMEOUT_SECS", 30)),
            auth_grpc_addr,
            shutdown_grace: Duration::from_secs(parsed_env_or("SHUTDOWN_GRACE_SECS", 10)),
        })
    }
}
