use axum::{Json, Router, extract::State, routing::get};
use serde_json::Value;

use crate::{error::AppError, services::scene_service, state::SharedState};

/// Exclusive scene endpoint.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/scene/exclusive", get(exclusive_scene))
}

/// First exclusive scene.
#[utoipa::path(
    get,
    path = "/api/scene/exclusive",
    tag = "scene",
    responses(
        (status = 200, description = "Scene object", content_type = "application/json"),
        (status = 500, description = "Scenes file unreadable")
    )
)]
pub async fn exclusive_scene(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    Ok(Json(scene_service::exclusive_scene(&state).await?))
}
