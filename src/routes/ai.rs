use axum::{Json, Router, extract::State, routing::post};
use axum_valid::Valid;

use crate::{
    dto::ai::{AskRequest, AskResponse},
    error::AppError,
    services::ai_service,
    state::SharedState,
};

/// AI co-host endpoint.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/ai/ask", post(ask))
}

/// Ask the AI co-host a question.
#[utoipa::path(
    post,
    path = "/api/ai/ask",
    tag = "ai",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Co-host answer", body = AskResponse),
        (status = 400, description = "Missing question"),
        (status = 500, description = "Upstream model failure")
    )
)]
pub async fn ask(
    State(state): State<SharedState>,
    Valid(Json(request)): Valid<Json<AskRequest>>,
) -> Result<Json<AskResponse>, AppError> {
    Ok(Json(ai_service::ask(&state, &request.question).await?))
}
