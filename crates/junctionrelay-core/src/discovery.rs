// ── Shared discovery and refresh ──
//
// Both platforms discover junctions the same way and refresh one junction
// the same way; only the entity kind in the logs differs. Failures are
// logged here and never escalate: discovery degrades to an empty list,
// refresh hands the error back for the entity to mark itself unavailable.

use junctionrelay_api::{Error as ApiError, JunctionClient, JunctionStatus};
use tracing::{error, info, warn};

use crate::entity::{EntityKind, JunctionRef};
use crate::host::Host;

/// Fetch the summary and turn every valid entry into a [`JunctionRef`].
///
/// Any failure (bad status, timeout, malformed body) yields an empty list.
pub async fn discover(client: &JunctionClient, host: &Host, kind: EntityKind) -> Vec<JunctionRef> {
    let junctions = match client.list_junctions().await {
        Ok(junctions) => junctions,
        Err(ApiError::Status { status, .. }) => {
            error!(%host, status, "failed to fetch junctions for {kind}s");
            Vec::new()
        }
        Err(e) => {
            warn!(%host, error = %e, "failed to fetch junctions for {kind}s");
            Vec::new()
        }
    };

    let refs: Vec<JunctionRef> = junctions
        .into_iter()
        .map(|j| JunctionRef {
            id: j.id,
            name: j.name,
            host: host.clone(),
        })
        .collect();

    if refs.is_empty() {
        warn!(%host, "no valid junction {kind}s found to add");
    } else {
        info!(%host, count = refs.len(), "adding junction {kind}s");
    }
    refs
}

/// Fetch one junction's status, logging any failure against the entity kind.
pub async fn refresh(
    client: &JunctionClient,
    junction: &JunctionRef,
    kind: EntityKind,
) -> Result<JunctionStatus, ApiError> {
    let result = client.get_junction(&junction.id).await;
    match &result {
        Ok(_) => {}
        Err(ApiError::Status { status, .. }) => {
            error!(id = %junction.id, status, "failed to update junction {kind}");
        }
        Err(e) => warn!(id = %junction.id, error = %e, "failed to update junction {kind}"),
    }
    result
}
