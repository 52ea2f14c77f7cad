//! Audit logging for logins and inventory changes.
//!
//! Events go to the `audit` tracing target so they can be routed apart from
//! request logs.
//!
//! ```ignore
//! use axum_helpers::audit::{AuditEvent, AuditOutcome};
//!
//! AuditEvent::new("product.delete", Some(format!("product:{}", id)), AuditOutcome::Success)
//!     .by(&session)
//!     .with_headers(&headers)
//!     .log();
//! ```

use crate::auth::Session;
use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    Success,
    Failure,
    Denied,
}

/// Structured audit event, built with chained setters and emitted with [`AuditEvent::log`].
#[derive(Debug, Serialize)]
pub struct AuditEvent {
    /// Email of the acting user, when known
    pub actor: Option<String>,
    /// e.g. "auth.login", "product.create", "battery_sale.return"
    pub action: String,
    /// e.g. "product:12"
    pub resource: Option<String>,
    pub outcome: AuditOutcome,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: impl Into<String>, resource: Option<String>, outcome: AuditOutcome) -> Self {
        Self {
            actor: None,
            action: action.into(),
            resource,
            outcome,
            ip_address: None,
            user_agent: None,
            timestamp: Utc::now(),
            details: None,
        }
    }

    /// Attribute the event to the session's user.
    pub fn by(mut self, session: &Session) -> Self {
        self.actor = Some(session.email.clone());
        self
    }

    /// Attribute the event to a not-yet-authenticated identity (e.g. a login attempt).
    pub fn by_email(mut self, email: impl Into<String>) -> Self {
        self.actor = Some(email.into());
        self
    }

    /// Record client IP and user agent from the request headers.
    pub fn with_headers(mut self, headers: &HeaderMap) -> Self {
        self.ip_address = extract_ip_from_headers(headers);
        self.user_agent = extract_user_agent(headers);
        self
    }

    pub fn with_details(mut self, details: impl Serialize) -> Self {
        self.details = serde_json::to_value(details).ok();
        self
    }

    pub fn log(self) {
        let rendered = serde_json::to_string(&self)
            .unwrap_or_else(|_| "Failed to serialize audit event".to_string());

        match self.outcome {
            AuditOutcome::Success => tracing::info!(
                target: "audit",
                actor = self.actor,
                action = %self.action,
                resource = self.resource,
                outcome = ?self.outcome,
                ip = self.ip_address,
                "{}",
                rendered
            ),
            AuditOutcome::Failure | AuditOutcome::Denied => tracing::warn!(
                target: "audit",
                actor = self.actor,
                action = %self.action,
                resource = self.resource,
                outcome = ?self.outcome,
                ip = self.ip_address,
                "{}",
                rendered
            ),
        }
    }
}

/// Client IP from `X-Forwarded-For` (first hop) or `X-Real-IP`.
pub fn extract_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
}

pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}
