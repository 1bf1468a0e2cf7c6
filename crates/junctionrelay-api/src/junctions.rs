// Junction endpoints
//
// Listing and status reads under `{prefix}/junctions`, start/stop
// commands under `{prefix}/connections`, plus the setup probe.

use serde_json::Value;
use tracing::{debug, warn};

use crate::client::JunctionClient;
use crate::error::Error;
use crate::models::{Junction, JunctionId, JunctionStatus, Summary};

impl JunctionClient {
    /// Probe the backend once: `200 OK` with any parseable JSON body.
    ///
    /// `GET {probe}` (default `/api/junctions/summary`)
    pub async fn probe(&self) -> Result<(), Error> {
        let url = self.url(&self.paths().probe)?;
        debug!(%url, "probing backend");
        let _: Value = self.get(url).await?;
        Ok(())
    }

    /// Fetch and validate the junction summary.
    ///
    /// `GET {prefix}/junctions/summary`
    pub async fn summary(&self) -> Result<Summary, Error> {
        let url = self.api_url("junctions/summary")?;
        let body: Value = self.get(url).await?;
        Summary::parse(body)
    }

    /// List junctions, skipping (and logging) malformed summary entries.
    pub async fn list_junctions(&self) -> Result<Vec<Junction>, Error> {
        let summary = self.summary().await?;
        for rejected in &summary.rejected {
            warn!(index = rejected.index, reason = %rejected.reason, "skipping malformed junction entry");
        }
        debug!(count = summary.junctions.len(), "listed junctions");
        Ok(summary.junctions)
    }

    /// Fetch one junction's current status.
    ///
    /// `GET {prefix}/junctions/{id}`
    pub async fn get_junction(&self, id: &JunctionId) -> Result<JunctionStatus, Error> {
        let url = self.api_url_with_id("junctions", id.as_str())?;
        self.get(url).await
    }

    /// Start a junction's connections.
    ///
    /// `POST {prefix}/connections/start/{id}`
    pub async fn start_connection(&self, id: &JunctionId) -> Result<(), Error> {
        let url = self.api_url_with_id("connections/start", id.as_str())?;
        debug!(%id, "starting junction");
        self.post(url).await
    }

    /// Stop a junction's connections.
    ///
    /// `POST {prefix}/connections/stop/{id}`
    pub async fn stop_connection(&self, id: &JunctionId) -> Result<(), Error> {
        let url = self.api_url_with_id("connections/stop", id.as_str())?;
        debug!(%id, "stopping junction");
        self.post(url).await
    }
}
