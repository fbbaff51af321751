//! Startup discovery of specialist capability descriptors.

use std::time::Duration;

use cepnet_common::{CapabilityDescriptor, CepnetError, Result};
use tracing::{info, warn};

/// Fetch the descriptor published at `{base_url}/card`.
pub async fn fetch_card(
    client: &reqwest::Client,
    base_url: &str,
    timeout: Duration,
) -> Result<CapabilityDescriptor> {
    let url = format!("{}/card", base_url.trim_end_matches('/'));
    let response = client
        .get(&url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| CepnetError::Discovery(format!("{url}: {e}")))?;

    if !response.status().is_success() {
        return Err(CepnetError::Discovery(format!(
            "{url}: unexpected status {}",
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| CepnetError::Discovery(format!("{url}: invalid descriptor: {e}")))
}

/// Probe every base URL in order and keep the descriptors that answered.
pub async fn discover(
    client: &reqwest::Client,
    base_urls: &[String],
    timeout: Duration,
) -> Vec<CapabilityDescriptor> {
    let mut found = Vec::with_capacity(base_urls.len());

    for url in base_urls {
        match fetch_card(client, url, timeout).await {
            Ok(card) => {
                info!(agent = %card.agent_id, name = %card.name, %url, "Discovered specialist");
                found.push(card);
            }
            Err(e) => warn!(%url, error = %e, "Skipping specialist"),
        }
    }

    info!(count = found.len(), "Discovery finished");
    found
}
