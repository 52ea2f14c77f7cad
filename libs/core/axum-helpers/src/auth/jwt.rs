use super::config::JwtConfig;
use super::store::RevocationList;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cookie carrying the token, read by the browser-side route guard as well.
pub const AUTH_COOKIE: &str = "authToken";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JwtClaims {
    pub sub: String,        // User ID
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,        // Token ID, the revocation key
}

/// A freshly signed token together with its claims.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: JwtClaims,
}

/// Stateless HS256 tokens plus an in-memory revocation list for logout.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
    ttl_seconds: i64,
    revoked: RevocationList,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_seconds = config.ttl_seconds, "JWT auth initialized");
        Self {
            secret: config.secret.clone(),
            ttl_seconds: config.ttl_seconds,
            revoked: RevocationList::new(),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Sign a token for the given user.
    pub fn issue_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
        roles: &[String],
    ) -> eyre::Result<IssuedToken> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            roles: roles.to_vec(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(IssuedToken { token, claims })
    }

    /// Verify signature and expiry, then make sure the token was not revoked.
    pub async fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;

        if self.revoked.is_revoked(&token_data.claims.jti).await {
            eyre::bail!("token {} has been revoked", token_data.claims.jti);
        }

        Ok(token_data.claims)
    }

    /// Revoke a token until its natural expiry (logout).
    pub async fn revoke(&self, token_id: &str, expires_at: i64) {
        self.revoked.revoke(token_id, expires_at).await;
        tracing::debug!(jti = %token_id, "Token revoked");
    }
}
