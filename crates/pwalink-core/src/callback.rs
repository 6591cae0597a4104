//! PWACALLBACK payload construction.
//!
//! The management page takes its command as a fixed-schema XML fragment
//! wrapped in a form-url-encoded POST body. Field names and order are fixed
//! by the server; do not reorder.

use uuid::Uuid;

use crate::constants::{FIELD_PWA_XML_DATA, FIELD_REQUEST_DIGEST, OPERATION_EDIT_WEB};

/// A single connect or disconnect command.
///
/// An empty `relative_site_url` is the protocol's signal for "remove the
/// association"; it travels together with the nil root-site id. There is no
/// separate disconnect operation on the wire.
#[derive(Debug, Clone)]
pub struct ConnectionRequest {
    pub project_id: Uuid,
    pub relative_site_url: String,
    pub root_site_id: Uuid,
}

impl ConnectionRequest {
    /// Request connecting `project_id` to the site at `relative_site_url`.
    pub fn connect(
        project_id: Uuid,
        relative_site_url: impl Into<String>,
        root_site_id: Uuid,
    ) -> Self {
        Self {
            project_id,
            relative_site_url: relative_site_url.into(),
            root_site_id,
        }
    }

    /// Request disconnecting `project_id` from its current site.
    pub fn disconnect(project_id: Uuid) -> Self {
        Self {
            project_id,
            relative_site_url: String::new(),
            root_site_id: Uuid::nil(),
        }
    }

    /// Whether this request removes the association.
    pub fn is_disconnect(&self) -> bool {
        self.relative_site_url.is_empty()
    }

    /// Render the PWACALLBACK fragment for this request.
    ///
    /// The site name is sent with leading and trailing slashes trimmed; an
    /// empty name becomes an empty element.
    pub fn to_callback_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<PWACALLBACK>");
        xml.push_str("<INPUT NAME=\"idInformational\"/>");
        xml.push_str(&format!(
            "<INPUT NAME=\"idOperation\">{OPERATION_EDIT_WEB}</INPUT>"
        ));
        xml.push_str(&format!(
            "<INPUT NAME=\"idProjectUID\">{}</INPUT>",
            self.project_id
        ));

        let site_name = self.relative_site_url.trim_matches('/');
        if site_name.is_empty() {
            xml.push_str("<INPUT NAME=\"idProjectName\"/>");
        } else {
            xml.push_str(&format!(
                "<INPUT NAME=\"idProjectName\">{}</INPUT>",
                escape_text(site_name)
            ));
        }

        xml.push_str(&format!(
            "<INPUT NAME=\"idWSSServerUID\">{}</INPUT>",
            self.root_site_id
        ));
        xml.push_str("<INPUT NAME=\"idWSSWebFullURL\"/>");
        xml.push_str("<INPUT NAME=\"idNewMode\"/>");
        xml.push_str("</PWACALLBACK>");
        xml
    }

    /// Render the complete form-url-encoded POST body for this request.
    pub fn to_form_body(&self, form_digest: &str) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair(FIELD_REQUEST_DIGEST, form_digest)
            .append_pair(FIELD_PWA_XML_DATA, &self.to_callback_xml())
            .finish()
    }
}

/// Minimal escaping for interpolated element content.
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
