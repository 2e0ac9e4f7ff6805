//! Payloads of the AI co-host route.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Question forwarded to the AI co-host.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AskRequest {
    /// Viewer question, required.
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing question"))]
    pub question: String,
}

/// Answer produced by the AI co-host.
#[derive(Debug, Serialize, ToSchema)]
pub struct AskResponse {
    /// Generated answer text.
    pub response: String,
}
