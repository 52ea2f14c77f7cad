//! JWT configuration, loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

/// Default token lifetime: one working day.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 8 * 60 * 60;

/// JWT authentication configuration.
///
/// Environment variables:
/// - `JWT_SECRET` (required): at least 32 characters
/// - `JWT_TTL_SECONDS` (optional): token lifetime, defaults to 8 hours
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: i64,
}

impl JwtConfig {
    /// Manual construction, mostly for tests.
    ///
    /// # Panics
    /// Panics if the secret is shorter than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            ttl_seconds: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    pub fn with_ttl_seconds(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let ttl_seconds = env_parse_or("JWT_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECS)?;
        if ttl_seconds <= 0 {
            return Err(ConfigError::ParseError {
                key: "JWT_TTL_SECONDS".to_string(),
                details: "must be a positive number of seconds".to_string(),
            });
        }

        Ok(Self {
            secret,
            ttl_seconds,
        })
    }
}
