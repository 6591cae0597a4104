//! Server response parsing.
//!
//! Two read-side decoders live here:
//! - the management page's callback reply, carried as `DATA` elements keyed
//!   by an `ID` attribute
//! - the root-site lookup reply, carrying the site collection id
//!
//! Both scans match elements by local name only. The server namespaces its
//! responses loosely, so namespace-qualified lookup would reject valid
//! replies; keep the lookups namespace-agnostic.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::{PwalinkError, PwalinkResult};

/// Structured outcome of a connect or disconnect request.
#[derive(Debug, Clone, Serialize)]
pub struct CallbackResult {
    error_code: i32,
    message: String,
    user_information: String,
}

impl CallbackResult {
    /// Build a result, enforcing the non-empty message invariant.
    ///
    /// An empty message is never a valid zero value; a response without one
    /// is rejected before a result exists.
    pub fn new(
        error_code: i32,
        message: impl Into<String>,
        user_information: impl Into<String>,
    ) -> PwalinkResult<Self> {
        let message = message.into();
        if message.is_empty() {
            return Err(PwalinkError::invalid_argument(
                "the result message cannot be empty",
            ));
        }
        Ok(Self {
            error_code,
            message,
            user_information: user_information.into(),
        })
    }

    pub fn error_code(&self) -> i32 {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn user_information(&self) -> &str {
        &self.user_information
    }

    /// Whether the server reported the operation as successful.
    pub fn is_success(&self) -> bool {
        self.message.eq_ignore_ascii_case("Success")
    }
}

impl fmt::Display for CallbackResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ErrorCode: {} | Message: {} | UserInformation: {}",
            self.error_code, self.message, self.user_information
        )
    }
}

/// Parse a callback response body into a `CallbackResult`.
///
/// Scans every descendant `DATA` element in document order and dispatches on
/// its `ID` attribute (case-sensitive): `idError` is the numeric error code,
/// `idMessage` the result message, `UserInformation` auxiliary detail.
/// Elements with other or absent IDs are ignored; a repeated ID keeps its
/// last occurrence. Missing `idError` defaults to 0.
pub fn parse_callback_response(xml: &str) -> PwalinkResult<CallbackResult> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| {
        PwalinkError::malformed_response(format!("callback response is not valid XML: {e}"))
    })?;

    let mut error_code = 0i32;
    let mut message = String::new();
    let mut user_information = String::new();

    for node in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "DATA")
    {
        let text = node.text().unwrap_or("");
        match node.attribute("ID") {
            Some("idError") => {
                error_code = text.trim().parse().map_err(|_| {
                    PwalinkError::malformed_response(format!(
                        "DATA idError is not an integer: {text:?}"
                    ))
                })?;
            }
            Some("idMessage") => message = text.to_string(),
            Some("UserInformation") => user_information = text.to_string(),
            _ => {}
        }
    }

    CallbackResult::new(error_code, message, user_information)
}

/// Parse the root-site lookup response, returning the site collection id.
pub fn parse_site_id(xml: &str) -> PwalinkResult<Uuid> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| {
        PwalinkError::malformed_response(format!("site id response is not valid XML: {e}"))
    })?;

    let text = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == "Id")
        .and_then(|n| n.text())
        .ok_or_else(|| PwalinkError::protocol("no site id was retrieved"))?;

    Uuid::parse_str(text.trim())
        .map_err(|_| PwalinkError::protocol(format!("site id is not a UUID: {text:?}")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::errors::PwalinkError;

    #[test]
    fn success_response_parses() {
        let xml = concat!(
            "<HTML><BODY>",
            r#"<DATA ID="idError">0</DATA>"#,
            r#"<DATA ID="idMessage">Success</DATA>"#,
            "</BODY></HTML>"
        );
        let result = parse_callback_response(xml).unwrap();
        assert_eq!(result.error_code(), 0);
        assert_eq!(result.message(), "Success");
        assert_eq!(result.user_information(), "");
        assert!(result.is_success());
    }

    #[test]
    fn success_check_is_case_insensitive() {
        let xml = r#"<R><DATA ID="idMessage">SUCCESS</DATA></R>"#;
        assert!(parse_callback_response(xml).unwrap().is_success());
    }

    #[test]
    fn failure_response_parses() {
        let xml = concat!(
            "<R>",
            r#"<DATA ID="idError">9133</DATA>"#,
            r#"<DATA ID="idMessage">ProjectNotFound</DATA>"#,
            r#"<DATA ID="UserInformation">The project does not exist.</DATA>"#,
            "</R>"
        );
        let result = parse_callback_response(xml).unwrap();
        assert_eq!(result.error_code(), 9133);
        assert_eq!(result.message(), "ProjectNotFound");
        assert_eq!(result.user_information(), "The project does not exist.");
        assert!(!result.is_success());
    }

    #[test]
    fn missing_message_is_invalid_argument() {
        let xml = r#"<R><DATA ID="idError">0</DATA></R>"#;
        assert_matches!(
            parse_callback_response(xml),
            Err(PwalinkError::InvalidArgument(_))
        );
    }

    #[test]
    fn malformed_error_code_is_fatal() {
        let xml = r#"<R><DATA ID="idError">many</DATA><DATA ID="idMessage">Success</DATA></R>"#;
        assert_matches!(
            parse_callback_response(xml),
            Err(PwalinkError::MalformedResponse(_))
        );
    }

    #[test]
    fn invalid_xml_is_malformed_response() {
        assert_matches!(
            parse_callback_response("<not-xml"),
            Err(PwalinkError::MalformedResponse(_))
        );
    }

    #[test]
    fn unrecognized_and_absent_ids_are_ignored() {
        let xml = concat!(
            "<R>",
            r#"<DATA ID="idSomethingElse">junk</DATA>"#,
            "<DATA>no id at all</DATA>",
            r#"<DATA ID="idmessage">wrong case</DATA>"#,
            r#"<DATA ID="idMessage">Success</DATA>"#,
            "</R>"
        );
        let result = parse_callback_response(xml).unwrap();
        assert_eq!(result.message(), "Success");
        assert_eq!(result.error_code(), 0);
    }

    #[test]
    fn last_occurrence_of_repeated_id_wins() {
        let xml = concat!(
            "<R>",
            r#"<DATA ID="idMessage">First</DATA>"#,
            r#"<DATA ID="idMessage">Second</DATA>"#,
            "</R>"
        );
        let result = parse_callback_response(xml).unwrap();
        assert_eq!(result.message(), "Second");
    }

    #[test]
    fn display_matches_report_shape() {
        let result = CallbackResult::new(0, "Success", "").unwrap();
        assert_eq!(
            result.to_string(),
            "ErrorCode: 0 | Message: Success | UserInformation: "
        );
    }

    #[test]
    fn serializes_for_json_output() {
        let result = CallbackResult::new(0, "Success", "done").unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error_code"], 0);
        assert_eq!(json["message"], "Success");
        assert_eq!(json["user_information"], "done");
    }

    #[test]
    fn empty_message_rejected_at_construction() {
        assert_matches!(
            CallbackResult::new(0, "", ""),
            Err(PwalinkError::InvalidArgument(_))
        );
    }

    #[test]
    fn site_id_parses_namespaced_reply() {
        let xml = concat!(
            r#"<d:Id xmlns:d="http://schemas.microsoft.com/ado/2007/08/dataservices">"#,
            "9f0c64f6-9d35-4b62-9a0f-6a1c8c2b7f10",
            "</d:Id>"
        );
        let id = parse_site_id(xml).unwrap();
        assert_eq!(id.to_string(), "9f0c64f6-9d35-4b62-9a0f-6a1c8c2b7f10");
    }

    #[test]
    fn site_id_missing_is_protocol_error() {
        assert_matches!(parse_site_id("<Empty/>"), Err(PwalinkError::Protocol(_)));
    }

    #[test]
    fn site_id_not_a_uuid_is_protocol_error() {
        assert_matches!(
            parse_site_id("<Id>not-a-guid</Id>"),
            Err(PwalinkError::Protocol(_))
        );
    }
}
