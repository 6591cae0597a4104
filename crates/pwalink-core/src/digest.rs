//! Form digest token and context-info response parsing.
//!
//! The server authorizes state-changing requests with a short-lived
//! anti-forgery token ("form digest") issued by its context-info endpoint.
//! This module holds the token type and the pure parsing half; fetching and
//! caching live in `pwalink-client`.

use time::{Duration, OffsetDateTime};

use crate::errors::{PwalinkError, PwalinkResult};

/// A form digest value with its expiration instant.
///
/// Immutable once created; a refreshed digest replaces the whole value.
/// The value is non-empty by construction: the parsing boundary rejects
/// responses with an absent or empty digest before this type is built.
#[derive(Debug, Clone)]
pub struct FormDigest {
    value: String,
    expires_at_utc: OffsetDateTime,
}

impl FormDigest {
    /// Create a digest expiring `timeout_seconds` from now.
    ///
    /// A timeout of 0 produces a digest that is already expired, forcing
    /// the next use to fetch a fresh one.
    pub fn new(value: impl Into<String>, timeout_seconds: i64) -> Self {
        Self {
            value: value.into(),
            expires_at_utc: OffsetDateTime::now_utc() + Duration::seconds(timeout_seconds),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at_utc(&self) -> OffsetDateTime {
        self.expires_at_utc
    }

    /// Whether the digest is no longer valid for new requests.
    pub fn has_expired(&self) -> bool {
        OffsetDateTime::now_utc() >= self.expires_at_utc
    }
}

/// Parsed body of a context-info response.
#[derive(Debug, Clone)]
pub struct ContextInfo {
    pub form_digest_value: String,
    pub timeout_seconds: i64,
}

/// Parse a context-info response body.
///
/// Elements are matched by local name; the server namespaces its responses
/// loosely, so a namespace-qualified lookup would reject valid replies.
/// Fails with `Protocol` if `FormDigestValue` is absent or empty. A missing
/// or non-numeric `FormDigestTimeoutSeconds` yields a timeout of 0.
pub fn parse_context_info(xml: &str) -> PwalinkResult<ContextInfo> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| {
        PwalinkError::malformed_response(format!("context info is not valid XML: {e}"))
    })?;

    let form_digest_value = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "FormDigestValue")
        .and_then(|n| n.text())
        .map(str::to_string)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| PwalinkError::protocol("no form digest value was retrieved"))?;

    let timeout_seconds = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "FormDigestTimeoutSeconds")
        .and_then(|n| n.text())
        .and_then(|t| t.trim().parse::<i64>().ok())
        .unwrap_or(0);

    Ok(ContextInfo {
        form_digest_value,
        timeout_seconds,
    })
}
