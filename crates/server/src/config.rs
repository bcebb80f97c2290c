//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FOLIO_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `FOLIO_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 5000)
//! - `EMAIL_SERVICE` - SMTP provider name (`gmail`, `outlook`, ...) or relay host
//! - `EMAIL_USER` / `EMAIL_PASS` - SMTP credentials; `EMAIL_USER` is also the sender
//! - `CONTACT_EMAIL` - Recipient of contact form messages
//! - `EMAIL_SMTP_PORT` - SMTP port (default: 587)
//! - `PASSWORD_SCHEME` - `argon2` (default) or `plaintext`
//! - `STATIC_DIR` - Directory served for non-API paths, with `index.html` fallback
//! - `LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate, 0.0-1.0 (default: 0.1)
//!
//! The mail transport is only configured when `EMAIL_SERVICE`, `EMAIL_USER`,
//! `EMAIL_PASS` and `CONTACT_EMAIL` are all set.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

use crate::services::auth::PasswordScheme;
use crate::services::email::smtp_host_for_service;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// SMTP settings for the contact relay, when complete
    pub email: Option<EmailConfig>,
    /// How user credentials are stored and compared
    pub password_scheme: PasswordScheme,
    /// Static site served as the fallback for unknown paths
    pub static_dir: Option<PathBuf>,
    /// Log output format
    pub log_format: LogFormat,
    /// Error tracking settings
    pub sentry: SentryConfig,
}

/// SMTP configuration for the contact relay.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    /// Provider name as configured (e.g. `gmail`)
    pub service: String,
    /// Resolved SMTP relay host
    pub smtp_host: String,
    /// SMTP port
    pub smtp_port: u16,
    /// SMTP username, also used as the sender address
    pub username: String,
    /// SMTP password
    pub password: SecretString,
    /// Where contact form messages are delivered
    pub contact_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("service", &self.service)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("contact_address", &self.contact_address)
            .finish()
    }
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let database_url = env.database_url("FOLIO_DATABASE_URL")?;
        let host = env.parse_or("FOLIO_HOST", "0.0.0.0")?;
        let port = env.parse_or("PORT", "5000")?;
        let email = EmailConfig::from_env(&env)?;
        let password_scheme = env
            .get_env_or_default("PASSWORD_SCHEME", "argon2")
            .parse::<PasswordScheme>()
            .map_err(|e| ConfigError::InvalidEnvVar("PASSWORD_SCHEME".to_owned(), e.to_string()))?;
        let static_dir = env.get_optional_env("STATIC_DIR").map(PathBuf::from);
        let log_format = env.parse_or("LOG_FORMAT", "text")?;
        let sentry = SentryConfig {
            dsn: env.get_optional_env("SENTRY_DSN"),
            environment: env.get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", "1.0")?,
            traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", "0.1")?,
        };

        Ok(Self {
            database_url,
            host,
            port,
            email,
            password_scheme,
            static_dir,
            log_format,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl EmailConfig {
    fn from_env(env: &Env<'_>) -> Result<Option<Self>, ConfigError> {
        let (Some(service), Some(username), Some(password), Some(contact_address)) = (
            env.get_optional_env("EMAIL_SERVICE"),
            env.get_optional_env("EMAIL_USER"),
            env.get_optional_env("EMAIL_PASS"),
            env.get_optional_env("CONTACT_EMAIL"),
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            smtp_host: smtp_host_for_service(&service),
            service,
            smtp_port: env.parse_or("EMAIL_SMTP_PORT", "587")?,
            username,
            password: SecretString::from(password),
            contact_address,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Environment lookup. Empty values count as unset.
struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional environment variable.
    fn get_optional_env(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Get an environment variable with a default value.
    fn get_env_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional_env(key)
            .unwrap_or_else(|| default.to_owned())
    }

    /// Parse an environment variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_env_or_default(key, default)
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self, primary_key: &str) -> Result<SecretString, ConfigError> {
        self.get_optional_env(primary_key)
            .or_else(|| self.get_optional_env("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_owned()))
    }
}

/// Resolve the database URL the same way the server does.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` when neither `FOLIO_DATABASE_URL` nor
/// `DATABASE_URL` is set.
pub fn database_url_from_env() -> Result<SecretString, ConfigError> {
    let lookup = |key: &str| std::env::var(key).ok();
    Env(&lookup).database_url("FOLIO_DATABASE_URL")
}
