//! Configuration management for ServiceHub
//!
//! This module handles loading and validating configuration from environment variables,
//! with support for different environments (development, staging, production).

use std::env;
use std::time::Duration;
use thiserror::Error;

const DEV_JWT_SECRET: &str = "development-secret-change-in-production";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// Application environment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Which persistence collaborator backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "postgres" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid store backend: '{}'. Expected: postgres or memory",
                s
            ))),
        }
    }
}

/// Payment gateway credentials, built once at startup and handed to the
/// payment component.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub key_id: String,
    pub key_secret: String,
    pub api_url: String,
    pub currency: String,
    pub timeout: Duration,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,

    pub store_backend: StoreBackend,

    /// Database connection URL (required for the postgres backend)
    pub database_url: Option<String>,

    pub port: u16,

    pub db_max_connections: u32,

    /// Comma separated list of allowed CORS origins
    pub cors_allowed_origins: Option<String>,

    /// Log level (RUST_LOG)
    pub log_level: String,

    pub jwt_secret: String,

    /// Access token TTL in seconds (default: 86400 = 1 day)
    pub jwt_access_token_ttl_seconds: i64,

    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .map(|s| Environment::parse(&s))
            .unwrap_or(Ok(Environment::Development))?;

        let store_backend = env::var("STORE_BACKEND")
            .map(|s| StoreBackend::parse(&s))
            .unwrap_or(Ok(StoreBackend::Postgres))?;

        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("DATABASE_URL".to_string()));
        }

        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .unwrap_or(5);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS").ok();

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string());

        let jwt_access_token_ttl_seconds = env::var("JWT_ACCESS_TOKEN_TTL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<i64>()
            .unwrap_or(86400);

        let gateway_timeout_seconds = env::var("GATEWAY_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .unwrap_or(10);

        let gateway = GatewayConfig {
            key_id: env::var("RAZORPAY_KEY_ID").unwrap_or_default(),
            key_secret: env::var("RAZORPAY_KEY_SECRET").unwrap_or_default(),
            api_url: env::var("RAZORPAY_API_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".to_string()),
            currency: env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".to_string()),
            timeout: Duration::from_secs(gateway_timeout_seconds),
        };

        let config = Config {
            environment,
            store_backend,
            database_url,
            port,
            db_max_connections,
            cors_allowed_origins,
            log_level,
            jwt_secret,
            jwt_access_token_ttl_seconds,
            gateway,
        };
        config.validate()?;

        Ok(config)
    }

    /// Reject development defaults when running in production
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.environment.is_production() {
            return Ok(());
        }
        if self.jwt_secret == DEV_JWT_SECRET {
            return Err(ConfigError::MissingEnvVar("JWT_SECRET".to_string()));
        }
        if self.gateway.key_id.is_empty() {
            return Err(ConfigError::MissingEnvVar("RAZORPAY_KEY_ID".to_string()));
        }
        if self.gateway.key_secret.is_empty() {
            return Err(ConfigError::MissingEnvVar("RAZORPAY_KEY_SECRET".to_string()));
        }
        Ok(())
    }

    /// Database URL with the password masked, for logging
    pub fn database_url_masked(&self) -> String {
        let Some(url) = self.database_url.as_deref() else {
            return "<none>".to_string();
        };
        if let Some(at_pos) = url.find('@') {
            if let Some(colon_pos) = url[..at_pos].rfind(':') {
                let prefix = &url[..colon_pos + 1];
                let suffix = &url[at_pos..];
                return format!("{}****{}", prefix, suffix);
            }
        }
        url.to_string()
    }
}
