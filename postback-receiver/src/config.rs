//! Configuration module for environment variable parsing.
//!
//! Configuration is read once at startup and never changes afterwards.
//! The Signhost credentials are required; everything else has a default.

use std::env;
use std::fmt;

use crate::error::ConfigError;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default request body limit in bytes.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Shared secret used in the postback checksum
    pub signhost_shared_secret: String,

    /// Exact value expected in the `Authorization` header
    pub signhost_auth_header: String,

    /// Maximum accepted request body size
    pub max_body_bytes: usize,

    /// RabbitMQ connection URL for verified postbacks (log only when unset)
    pub cloudamqp_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            port: parse_or("PORT", &lookup, DEFAULT_PORT)?,

            signhost_shared_secret: required("SIGNHOST_SHARED_SECRET", &lookup)?,

            signhost_auth_header: required("SIGNHOST_AUTH_HEADER", &lookup)?,

            max_body_bytes: parse_or(
                "POSTBACK_MAX_BODY_BYTES",
                &lookup,
                DEFAULT_MAX_BODY_BYTES,
            )?,

            cloudamqp_url: lookup("CLOUDAMQP_URL").filter(|v| !v.trim().is_empty()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("signhost_shared_secret", &"<redacted>")
            .field("signhost_auth_header", &"<redacted>")
            .field("max_body_bytes", &self.max_body_bytes)
            .field("cloudamqp_url_set", &self.cloudamqp_url.is_some())
            .finish()
    }
}

/// Read a required credential. Blank values count as missing.
///
/// The value itself is kept verbatim.
fn required<F>(name: &'static str, lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<F, T>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}
