//! Student service configuration.

use std::env;

use common::{DatabaseConfig, HttpClientConfig, ServiceConfig};

/// Student service configuration.
#[derive(Clone)]
pub struct StudentServiceConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub http_client: HttpClientConfig,
    /// Base URL of the auth service
    pub auth_service_url: String,
    /// Base URL of the tuition service
    pub tuition_service_url: String,
    /// Base URL of the payment service
    pub payment_service_url: String,
}

impl std::fmt::Debug for StudentServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudentServiceConfig")
            .field("service", &self.service)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.database.max_connections)
            .field("min_connections", &self.database.min_connections)
            .field("http_client", &self.http_client)
            .field("auth_service_url", &self.auth_service_url)
            .field("tuition_service_url", &self.tuition_service_url)
            .field("payment_service_url", &self.payment_service_url)
            .finish()
    }
}

impl StudentServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                host: env::var("STUDENT_SERVICE_HOST").unwrap_or(defaults.service.host),
                port: parse_env("STUDENT_SERVICE_PORT").unwrap_or(defaults.service.port),
                log_level: env::var("LOG_LEVEL").unwrap_or(defaults.service.log_level),
            },
            database: DatabaseConfig {
                url: env::var("STUDENT_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            http_client: HttpClientConfig {
                connect_timeout_ms: parse_env("HTTP_CONNECT_TIMEOUT_MS")
                    .unwrap_or(defaults.http_client.connect_timeout_ms),
                request_timeout_ms: parse_env("HTTP_REQUEST_TIMEOUT_MS")
                    .unwrap_or(defaults.http_client.request_timeout_ms),
            },
            auth_service_url: env::var("AUTH_SERVICE_URL").unwrap_or(defaults.auth_service_url),
            tuition_service_url: env::var("TUITION_SERVICE_URL")
                .unwrap_or(defaults.tuition_service_url),
            payment_service_url: env::var("PAYMENT_SERVICE_URL")
                .unwrap_or(defaults.payment_service_url),
        }
    }
}

impl Default for StudentServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: "student-service".to_string(),
                port: 8083,
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
            http_client: HttpClientConfig::default(),
            auth_service_url: "http://localhost:8081".to_string(),
            tuition_service_url: "http://localhost:8084".to_string(),
            payment_service_url: "http://localhost:8085".to_string(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}
