//! Liveness payloads.

use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
}

impl HealthResponse {
    /// Create a health response indicating the remote show store is reachable.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    /// Create a health response indicating the backend runs on its fallback tiers.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
        }
    }
}

/// Payload of the `/` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexResponse {
    /// Fixed banner text.
    pub status: String,
}

impl Default for IndexResponse {
    fn default() -> Self {
        Self {
            status: "SyncPlay backend running".to_string(),
        }
    }
}
