// JunctionRelay HTTP client
//
// Wraps reqwest with URL construction against a normalized host, the
// exact-200 success rule, and JSON decoding. Endpoint methods live in
// `junctions.rs` to keep this module focused on transport mechanics.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Runtime API prefix shared by the list, status, start and stop endpoints.
pub const DEFAULT_API_PREFIX: &str = "/api/homeassistant";

/// Path probed once while validating a host during setup.
pub const DEFAULT_PROBE_PATH: &str = "/api/junctions/summary";

/// Path layout of the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPaths {
    /// Prefix for `junctions/...` and `connections/...` endpoints.
    pub prefix: String,
    /// Full path of the setup-time health probe.
    pub probe: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_API_PREFIX.into(),
            probe: DEFAULT_PROBE_PATH.into(),
        }
    }
}

/// HTTP client for one JunctionRelay backend.
///
/// Holds no connection state: every call builds its own `reqwest::Client`
/// from the transport config and drops it when the call returns.
#[derive(Debug, Clone)]
pub struct JunctionClient {
    base_url: Url,
    paths: ApiPaths,
    transport: TransportConfig,
}

impl JunctionClient {
    /// Create a client for `host`, which must already carry a scheme.
    pub fn new(host: &str, paths: ApiPaths, transport: TransportConfig) -> Result<Self, Error> {
        let base_url = Url::parse(host)?;
        Ok(Self {
            base_url,
            paths,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn paths(&self) -> &ApiPaths {
        &self.paths
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/{path}`, tolerating a trailing slash on the base and a
    /// missing leading slash on the path.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// `{base}{prefix}/{suffix}`
    pub(crate) fn api_url(&self, suffix: &str) -> Result<Url, Error> {
        let prefix = self.paths.prefix.trim_end_matches('/');
        self.url(&format!("{prefix}/{suffix}"))
    }

    /// `{base}{prefix}/{suffix}/{id}` with the id percent-encoded as one segment.
    pub(crate) fn api_url_with_id(&self, suffix: &str, id: &str) -> Result<Url, Error> {
        let mut url = self.api_url(suffix)?;
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(id);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode a `200 OK` JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let http = self.transport.build_client()?;
        let resp = http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(e, self.transport.timeout))?;

        let body = self.read_ok_body(resp).await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Send an empty POST request. Only `200 OK` counts as success.
    pub(crate) async fn post(&self, url: Url) -> Result<(), Error> {
        debug!("POST {}", url);

        let http = self.transport.build_client()?;
        let resp = http
            .post(url)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(e, self.transport.timeout))?;

        self.read_ok_body(resp).await.map(drop)
    }

    /// Return the body of a `200 OK`, or an `Error::Status` carrying
    /// whatever text the backend sent with the failure.
    async fn read_ok_body(&self, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        resp.text()
            .await
            .map_err(|e| Error::from_reqwest(e, self.transport.timeout))
    }
}
