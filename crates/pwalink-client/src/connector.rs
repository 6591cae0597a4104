//! The project-site connector.
//!
//! Orchestrates one connect or disconnect call end to end: relative-URL
//! precondition, memoized root-site-id resolution, payload construction,
//! digest acquisition, the management POST, and response parsing.

use pwalink_core::callback::ConnectionRequest;
use pwalink_core::constants::{
    MANAGE_WSS_PATH, SERVER_CALLBACK_HEADER, SERVER_CALLBACK_VALUE, SITE_ID_PATH,
};
use pwalink_core::response::{parse_callback_response, parse_site_id, CallbackResult};
use pwalink_core::{PwalinkError, PwalinkResult};
use url::Url;
use uuid::Uuid;

use crate::credentials::Credentials;
use crate::digest::FormDigestProvider;
use crate::transport::{HttpRequest, HttpTransport, ReqwestTransport};

/// Connects a project to a site collection, and disconnects it again, by
/// driving the Project Web App administrative callback endpoint.
///
/// One instance caches the root site id and the current form digest, so
/// reuse it for repeated calls against the same server. Methods take
/// `&mut self`; the protocol is strictly sequential, and sharing an
/// instance across threads requires external synchronization.
pub struct ProjectSiteConnector {
    base_url: Url,
    manage_url: Url,
    site_id_url: Url,
    transport: Box<dyn HttpTransport>,
    digests: FormDigestProvider,
    root_site_id: Option<Uuid>,
}

impl std::fmt::Debug for ProjectSiteConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectSiteConnector")
            .field("base_url", &self.base_url)
            .field("manage_url", &self.manage_url)
            .field("site_id_url", &self.site_id_url)
            .field("transport", &"<dyn HttpTransport>")
            .field("digests", &self.digests)
            .field("root_site_id", &self.root_site_id)
            .finish()
    }
}

impl ProjectSiteConnector {
    /// Build a connector using ambient credentials.
    ///
    /// `pwa_url` is the base URL of the Project Web App, e.g.
    /// `https://server/pwa`; a trailing slash is tolerated.
    pub fn new(pwa_url: &str) -> PwalinkResult<Self> {
        Self::with_credentials(pwa_url, Credentials::Ambient)
    }

    /// Build a connector with an explicit credential policy.
    pub fn with_credentials(pwa_url: &str, credentials: Credentials) -> PwalinkResult<Self> {
        Self::with_transport(pwa_url, Box::new(ReqwestTransport::new(credentials)?))
    }

    /// Build a connector over a custom transport.
    pub fn with_transport(
        pwa_url: &str,
        transport: Box<dyn HttpTransport>,
    ) -> PwalinkResult<Self> {
        let trimmed = pwa_url.trim_end_matches('/');
        let base_url = Url::parse(trimmed).map_err(|e| {
            PwalinkError::invalid_argument(format!("invalid Project Web App URL: {e}"))
        })?;

        let manage_url = Url::parse(&format!("{trimmed}{MANAGE_WSS_PATH}")).map_err(|e| {
            PwalinkError::invalid_argument(format!("invalid management URL: {e}"))
        })?;

        // The root-site lookup goes against the host, not the PWA path.
        let origin = base_url.origin().ascii_serialization();
        let site_id_url = Url::parse(&format!("{origin}{SITE_ID_PATH}")).map_err(|e| {
            PwalinkError::invalid_argument(format!("invalid site id URL: {e}"))
        })?;

        let digests = FormDigestProvider::new(&base_url)?;

        Ok(Self {
            base_url,
            manage_url,
            site_id_url,
            transport,
            digests,
            root_site_id: None,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Connect a project to the site collection at `relative_site_url`.
    ///
    /// The site URL must be a relative reference; an absolute URL fails
    /// before any network activity.
    pub fn connect_project(
        &mut self,
        project_id: Uuid,
        relative_site_url: &str,
    ) -> PwalinkResult<CallbackResult> {
        if Url::parse(relative_site_url).is_ok() {
            return Err(PwalinkError::invalid_argument(
                "the provided site URL must be relative",
            ));
        }

        let root_site_id = self.resolve_root_site_id()?;
        let request = ConnectionRequest::connect(project_id, relative_site_url, root_site_id);
        self.send_callback(&request)
    }

    /// Disconnect a project from its connected site collection.
    ///
    /// Same POST path as a connect, with the empty site name and nil
    /// root-site id that signal removal; no root-site lookup is performed.
    pub fn disconnect_project(&mut self, project_id: Uuid) -> PwalinkResult<CallbackResult> {
        let request = ConnectionRequest::disconnect(project_id);
        self.send_callback(&request)
    }

    fn send_callback(&mut self, request: &ConnectionRequest) -> PwalinkResult<CallbackResult> {
        let digest = self.digests.form_digest(self.transport.as_ref())?;
        let body = request.to_form_body(&digest);

        tracing::debug!(
            project_id = %request.project_id,
            disconnect = request.is_disconnect(),
            "posting callback"
        );

        let http = HttpRequest::post_form(self.manage_url.clone(), body)
            .with_header(SERVER_CALLBACK_HEADER, SERVER_CALLBACK_VALUE);
        let response = self.transport.execute(&http)?;

        parse_callback_response(&response.body)
    }

    /// Resolve the root site collection id, once per connector instance.
    fn resolve_root_site_id(&mut self) -> PwalinkResult<Uuid> {
        if let Some(id) = self.root_site_id {
            return Ok(id);
        }

        tracing::debug!(url = %self.site_id_url, "resolving root site id");
        let response = self
            .transport
            .execute(&HttpRequest::get(self.site_id_url.clone()))?;
        let id = parse_site_id(&response.body)?;

        self.root_site_id = Some(id);
        Ok(id)
    }
}
