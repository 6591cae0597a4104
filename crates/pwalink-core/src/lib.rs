//! pwalink-core
//!
//! Core protocol primitives for linking a project to a site collection
//! through the Project Web App administrative callback surface:
//! - `FormDigest` anti-forgery token plus context-info response parsing
//! - `ConnectionRequest` and PWACALLBACK payload construction
//! - `CallbackResult` and callback/site-id response parsing
//! - protocol constants shared with the networked client
//!
//! This crate performs no network or filesystem I/O. The networked layer
//! (`pwalink-client`) moves the bytes and passes them into the parsers here.

pub mod callback;
pub mod constants;
pub mod digest;
pub mod errors;
pub mod response;

pub use crate::errors::{PwalinkError, PwalinkResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::callback::ConnectionRequest;
    pub use crate::digest::{parse_context_info, ContextInfo, FormDigest};
    pub use crate::response::{parse_callback_response, parse_site_id, CallbackResult};
    pub use crate::{PwalinkError, PwalinkResult};
}
