//! In-memory revocation list for logged-out tokens.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Token ids (`jti`) that were revoked before their natural expiry.
///
/// Entries are kept until the token would have expired anyway and are purged
/// lazily on every insert. The list lives in process memory, so a restart
/// forgets it; tokens stay bounded by their TTL.
#[derive(Clone, Debug, Default)]
pub struct RevocationList {
    revoked: Arc<RwLock<HashMap<String, i64>>>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke `jti` until `expires_at` (unix seconds).
    pub async fn revoke(&self, jti: &str, expires_at: i64) {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        if expires_at > now {
            revoked.insert(jti.to_string(), expires_at);
        }
    }

    pub async fn is_revoked(&self, jti: &str) -> bool {
        let revoked = self.revoked.read().await;
        revoked.contains_key(jti)
    }

    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
