//! Protocol constants shared between the core parsers and the networked
//! client.
//!
//! Keep these stable; they are dictated by the server's administrative
//! callback surface, not by this crate.

/// Site-relative path of the context-info endpoint issuing form digests.
pub const CONTEXT_INFO_PATH: &str = "/_api/contextinfo";

/// Site-relative path of the management page accepting PWACALLBACK posts.
pub const MANAGE_WSS_PATH: &str = "/_layouts/15/pwa/Admin/ManageWSS.aspx";

/// Host-relative path resolving the root site collection id.
pub const SITE_ID_PATH: &str = "/_api/site/id";

/// Fixed user agent sent on every request.
pub const USER_AGENT: &str = "NONISV|SharePoint|Custom Tool";

/// Header flag marking a POST as a server callback.
pub const SERVER_CALLBACK_HEADER: &str = "PJ_SERVER_CALLBACK";

/// Value of the server-callback header flag.
pub const SERVER_CALLBACK_VALUE: &str = "1";

/// Operation name understood by the management page.
pub const OPERATION_EDIT_WEB: &str = "EditWeb";

/// Form field carrying the anti-forgery digest.
pub const FIELD_REQUEST_DIGEST: &str = "__REQUESTDIGEST";

/// Form field carrying the PWACALLBACK fragment.
pub const FIELD_PWA_XML_DATA: &str = "PWAXMLData";
