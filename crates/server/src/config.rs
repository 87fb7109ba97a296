//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `TOKEN_SECRET` - HS256 secret shared with the token issuer
//!   (min 32 chars, high entropy)
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 3000)
//! - `TOKEN_ISSUER` - Expected `iss` claim (default: "palisade")
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_ISSUER: &str = "palisade";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` connection URL (contains password).
    pub database_url: SecretString,
    /// HS256 secret used to verify bearer tokens.
    pub token_secret: SecretString,
    /// Expected token issuer.
    pub token_issuer: String,
    /// Bind address.
    pub host: IpAddr,
    /// Listen port.
    pub port: u16,
    /// Sentry DSN, when error tracking is enabled.
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag.
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is missing, fails
    /// to parse, or a secret looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = SecretString::from(required("DATABASE_URL")?);
        let token_secret = SecretString::from(required("TOKEN_SECRET")?);
        check_secret("TOKEN_SECRET", &token_secret)?;

        let host = optional("HOST")
            .map_or(Ok(IpAddr::from([127, 0, 0, 1])), |raw| {
                raw.parse()
                    .map_err(|_| ConfigError::InvalidEnvVar("HOST".to_owned(), raw))
            })?;
        let port = optional("PORT").map_or(Ok(DEFAULT_PORT), |raw| {
            raw.parse()
                .map_err(|_| ConfigError::InvalidEnvVar("PORT".to_owned(), raw))
        })?;

        Ok(Self {
            database_url,
            token_secret,
            token_issuer: optional("TOKEN_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.to_owned()),
            host,
            port,
            sentry_dsn: optional("SENTRY_DSN"),
            sentry_environment: optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// The socket address the server binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Reject short or obviously-placeholder secrets at startup rather than
/// letting them reach production token verification.
fn check_secret(name: &str, secret: &SecretString) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            name.to_owned(),
            format!("must be at least {MIN_TOKEN_SECRET_LENGTH} characters"),
        ));
    }
    let lowered = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                name.to_owned(),
                format!("looks like a placeholder (contains {pattern:?})"),
            ));
        }
    }
    Ok(())
}
