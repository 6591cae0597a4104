//! HTTP transport seam.
//!
//! The connector and digest provider talk to the server through the
//! `HttpTransport` trait. The default implementation wraps reqwest's
//! blocking client; tests substitute an in-memory transport to observe
//! request traffic without a server.

use pwalink_core::constants::USER_AGENT;
use pwalink_core::{PwalinkError, PwalinkResult};
use url::Url;

use crate::credentials::Credentials;

/// HTTP method subset used by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A single outbound request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    /// Extra headers beyond the fixed user agent and the credential policy,
    /// which the transport applies itself.
    pub headers: Vec<(&'static str, String)>,
    pub content_type: Option<&'static str>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            content_type: None,
            body: None,
        }
    }

    /// POST with an empty body.
    pub fn post_empty(url: Url) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            headers: Vec::new(),
            content_type: None,
            body: Some(String::new()),
        }
    }

    /// POST with a form-url-encoded body.
    pub fn post_form(url: Url, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url,
            headers: Vec::new(),
            content_type: Some("application/x-www-form-urlencoded"),
            body: Some(body),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Look up an extra header by name (test-side convenience).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A response body with its status code.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Blocking transport abstraction.
///
/// Implementations apply the fixed user agent and the configured credential
/// policy uniformly to every request, and surface non-success statuses as
/// transport errors.
pub trait HttpTransport {
    fn execute(&self, request: &HttpRequest) -> PwalinkResult<HttpResponse>;
}

/// Default transport over reqwest's blocking client.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    credentials: Credentials,
}

impl ReqwestTransport {
    pub fn new(credentials: Credentials) -> PwalinkResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(PwalinkError::transport)?;
        Ok(Self {
            client,
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> PwalinkResult<HttpResponse> {
        tracing::debug!(method = ?request.method, url = %request.url, "issuing request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(request.url.clone()),
            HttpMethod::Post => self.client.post(request.url.clone()),
        };

        if let Credentials::Explicit(cred) = &self.credentials {
            builder = builder.basic_auth(cred.login_name(), Some(&cred.password));
        }

        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(PwalinkError::transport)?;
        let status = response.status().as_u16();
        let response = response.error_for_status().map_err(PwalinkError::transport)?;
        let body = response.text().map_err(PwalinkError::transport)?;

        tracing::trace!(status, bytes = body.len(), "response received");

        Ok(HttpResponse { status, body })
    }
}
