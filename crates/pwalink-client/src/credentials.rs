//! Credential policy.
//!
//! "Use whatever the environment provides" versus "use these credentials" is
//! a single tagged variant, resolved once at connector construction and
//! applied uniformly to every request of that instance.

use std::fmt;

/// Explicit account credentials.
#[derive(Clone)]
pub struct NetworkCredentials {
    pub username: String,
    pub password: String,
    pub domain: Option<String>,
}

impl NetworkCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            domain: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Login name in `DOMAIN\user` form when a domain is set.
    pub fn login_name(&self) -> String {
        match &self.domain {
            Some(domain) => format!("{domain}\\{}", self.username),
            None => self.username.clone(),
        }
    }
}

impl fmt::Debug for NetworkCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("domain", &self.domain)
            .finish()
    }
}

/// Credential policy for all requests of one connector instance.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// Send no explicit credentials; rely on what the environment provides.
    #[default]
    Ambient,
    /// Send the given credentials on every request.
    Explicit(NetworkCredentials),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_name_includes_domain_when_set() {
        let plain = NetworkCredentials::new("svc-pwa", "secret");
        assert_eq!(plain.login_name(), "svc-pwa");

        let domained = NetworkCredentials::new("svc-pwa", "secret").with_domain("CORP");
        assert_eq!(domained.login_name(), "CORP\\svc-pwa");
    }

    #[test]
    fn debug_redacts_password() {
        let cred = NetworkCredentials::new("svc-pwa", "secret");
        let rendered = format!("{cred:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("svc-pwa"));
    }
}
