//! pwalink-client
//!
//! Networked layer for pwalink:
//! - `Credentials` policy (ambient or explicit), resolved once at construction
//! - `HttpTransport` seam with a blocking reqwest implementation
//! - `FormDigestProvider` with expiry-based caching
//! - `ProjectSiteConnector` orchestrating connect/disconnect calls
//!
//! All pure protocol logic (payloads, parsers, errors) lives in
//! `pwalink-core`; this crate only moves bytes.

pub mod connector;
pub mod credentials;
pub mod digest;
pub mod transport;

pub use pwalink_core::{PwalinkError, PwalinkResult};

pub use crate::connector::ProjectSiteConnector;
pub use crate::credentials::{Credentials, NetworkCredentials};
pub use crate::digest::FormDigestProvider;
pub use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
