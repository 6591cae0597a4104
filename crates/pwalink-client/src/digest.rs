//! Form digest acquisition and caching.
//!
//! A valid cached digest is returned without touching the network; anything
//! else costs one POST to the context-info endpoint. A fresh digest replaces
//! the cache wholesale.

use pwalink_core::constants::CONTEXT_INFO_PATH;
use pwalink_core::digest::{parse_context_info, FormDigest};
use pwalink_core::{PwalinkError, PwalinkResult};
use url::Url;

use crate::transport::{HttpRequest, HttpTransport};

/// Fetches form digests from the context-info endpoint and caches them until
/// they expire.
#[derive(Debug)]
pub struct FormDigestProvider {
    endpoint: Url,
    cached: Option<FormDigest>,
}

impl FormDigestProvider {
    /// Build a provider for the context-info endpoint under `base_url`.
    pub fn new(base_url: &Url) -> PwalinkResult<Self> {
        let endpoint = Url::parse(&format!(
            "{}{CONTEXT_INFO_PATH}",
            base_url.as_str().trim_end_matches('/')
        ))
        .map_err(|e| PwalinkError::invalid_argument(format!("invalid context info URL: {e}")))?;

        Ok(Self {
            endpoint,
            cached: None,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Return a digest valid for the next request.
    ///
    /// Serves the cached value when it has not expired; otherwise issues one
    /// POST with an empty body and replaces the cache. A server timeout of 0
    /// (or an absent timeout field) makes the fresh digest expire
    /// immediately, so the next call fetches again.
    pub fn form_digest(&mut self, transport: &dyn HttpTransport) -> PwalinkResult<String> {
        if let Some(digest) = self.cached.as_ref().filter(|d| !d.has_expired()) {
            return Ok(digest.value().to_string());
        }

        tracing::debug!(url = %self.endpoint, "fetching a fresh form digest");
        let response = transport.execute(&HttpRequest::post_empty(self.endpoint.clone()))?;
        let info = parse_context_info(&response.body)?;

        let digest = FormDigest::new(info.form_digest_value, info.timeout_seconds);
        let value = digest.value().to_string();
        self.cached = Some(digest);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use assert_matches::assert_matches;

    use super::*;
    use crate::transport::{HttpResponse, HttpTransport};

    struct ScriptedTransport {
        responses: RefCell<VecDeque<HttpResponse>>,
        calls: RefCell<usize>,
    }

    impl ScriptedTransport {
        fn new(bodies: &[&str]) -> Self {
            Self {
                responses: RefCell::new(bodies.iter().map(|b| HttpResponse::ok(*b)).collect()),
                calls: RefCell::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl HttpTransport for ScriptedTransport {
        fn execute(&self, _request: &HttpRequest) -> PwalinkResult<HttpResponse> {
            *self.calls.borrow_mut() += 1;
            self.responses
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| PwalinkError::transport_message("no scripted response left"))
        }
    }

    fn context_info(value: &str, timeout: Option<&str>) -> String {
        let timeout = timeout
            .map(|t| format!("<FormDigestTimeoutSeconds>{t}</FormDigestTimeoutSeconds>"))
            .unwrap_or_default();
        format!("<ContextInfo><FormDigestValue>{value}</FormDigestValue>{timeout}</ContextInfo>")
    }

    fn provider() -> FormDigestProvider {
        FormDigestProvider::new(&Url::parse("https://server/pwa").unwrap()).unwrap()
    }

    #[test]
    fn endpoint_is_under_the_base_url() {
        assert_eq!(
            provider().endpoint().as_str(),
            "https://server/pwa/_api/contextinfo"
        );
    }

    #[test]
    fn valid_cached_digest_skips_the_network() {
        let transport = ScriptedTransport::new(&[&context_info("0xABC", Some("1800"))]);
        let mut provider = provider();

        assert_eq!(provider.form_digest(&transport).unwrap(), "0xABC");
        assert_eq!(provider.form_digest(&transport).unwrap(), "0xABC");
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn absent_timeout_forces_refetch_on_next_use() {
        let transport = ScriptedTransport::new(&[
            &context_info("0xFIRST", None),
            &context_info("0xSECOND", None),
        ]);
        let mut provider = provider();

        assert_eq!(provider.form_digest(&transport).unwrap(), "0xFIRST");
        assert_eq!(provider.form_digest(&transport).unwrap(), "0xSECOND");
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn missing_digest_value_is_protocol_error() {
        let transport = ScriptedTransport::new(&["<ContextInfo/>"]);
        let mut provider = provider();

        assert_matches!(
            provider.form_digest(&transport),
            Err(PwalinkError::Protocol(_))
        );
    }

    #[test]
    fn transport_failure_passes_through() {
        // Empty script: the fake returns a transport error.
        let transport = ScriptedTransport::new(&[]);
        let mut provider = provider();

        assert_matches!(
            provider.form_digest(&transport),
            Err(PwalinkError::Transport { .. })
        );
    }
}
