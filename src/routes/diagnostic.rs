use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::diagnostic::DiagnosticReport, services::diagnostic_service, state::SharedState};

/// Storage diagnostic endpoint.
pub fn router() -> Router<SharedState> {
    Router::new().route("/diagnostic/storage", get(storage_diagnostic))
}

/// Probe the remote show store and the local fallback file step by step.
#[utoipa::path(
    get,
    path = "/diagnostic/storage",
    tag = "diagnostic",
    responses((status = 200, description = "Diagnostic report", body = DiagnosticReport))
)]
pub async fn storage_diagnostic(State(state): State<SharedState>) -> Json<DiagnosticReport> {
    Json(diagnostic_service::diagnose(&state).await)
}
