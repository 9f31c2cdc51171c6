//! Startup reachability check for the primary service.

use crate::endpoint::EndpointClient;
use shared::error::ClientError;
use shared::settings::ClientSettings;
use tracing::{info, warn};

pub const PROBE_FAILED_TITLE: &str = "API Connection Issue";
pub const PROBE_FAILED_MESSAGE: &str = "Unable to connect to backend service. Please try again later or contact support if the issue persists.";

/// Issue the probe once. Failure is reported, never fatal.
pub async fn check_primary(settings: &ClientSettings) -> Result<(), ClientError> {
    let client = EndpointClient::new(settings.primary.clone());
    match client.probe().await {
        Ok(()) => {
            info!(service = %settings.primary.name, "backend connection verified");
            Ok(())
        }
        Err(e) => {
            warn!(service = %settings.primary.name, "backend connection failed: {}", e);
            Err(e)
        }
    }
}
