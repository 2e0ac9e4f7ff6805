use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::quiz::{CurrentQuestionResponse, QuestionDto, ShowQuery},
    error::AppError,
    services::quiz_service,
    state::SharedState,
};

/// Viewer-facing quiz endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/quiz/current", get(current_catalog))
        .route("/api/quiz/current_question/{show_id}", get(current_question))
}

/// Full catalog of a show with the active question first.
#[utoipa::path(
    get,
    path = "/api/quiz/current",
    tag = "quiz",
    params(ShowQuery),
    responses((status = 200, description = "Catalog, active question first", body = [QuestionDto]))
)]
pub async fn current_catalog(
    State(state): State<SharedState>,
    Query(query): Query<ShowQuery>,
) -> Json<Vec<QuestionDto>> {
    Json(quiz_service::current_catalog(&state, query.show_id.as_deref()).await)
}

/// Active question of a show.
#[utoipa::path(
    get,
    path = "/api/quiz/current_question/{show_id}",
    tag = "quiz",
    params(("show_id" = String, Path, description = "Show identifier")),
    responses(
        (status = 200, description = "Active question", body = CurrentQuestionResponse),
        (status = 404, description = "Active question missing from the catalog")
    )
)]
pub async fn current_question(
    State(state): State<SharedState>,
    Path(show_id): Path<String>,
) -> Result<Json<CurrentQuestionResponse>, AppError> {
    Ok(Json(quiz_service::current_question(&state, &show_id).await?))
}
