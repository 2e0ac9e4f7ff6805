use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use axum_valid::Valid;

use crate::{
    dto::admin::{AdminOverview, AdminQuery, SetActiveQuestionRequest, SetActiveQuestionResponse},
    services::admin_service,
    state::SharedState,
};

/// Active question administration. Unauthenticated.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/admin", get(overview).post(set_active_question))
        .route("/admin/shows/{show_id}/catalog", delete(invalidate_catalog))
}

/// Shows, catalog and active question of the selected show.
#[utoipa::path(
    get,
    path = "/admin",
    tag = "admin",
    params(AdminQuery),
    responses((status = 200, description = "Admin overview", body = AdminOverview))
)]
pub async fn overview(
    State(state): State<SharedState>,
    Query(query): Query<AdminQuery>,
) -> Json<AdminOverview> {
    Json(admin_service::overview(&state, query.show_id.as_deref()).await)
}

/// Switch the active question of a show.
///
/// Answers 200 even when only the local mirror was written; `success` tells the two apart.
#[utoipa::path(
    post,
    path = "/admin",
    tag = "admin",
    request_body = SetActiveQuestionRequest,
    responses(
        (status = 200, description = "Outcome of the update", body = SetActiveQuestionResponse),
        (status = 400, description = "Invalid show or question identifier")
    )
)]
pub async fn set_active_question(
    State(state): State<SharedState>,
    Valid(Json(request)): Valid<Json<SetActiveQuestionRequest>>,
) -> Json<SetActiveQuestionResponse> {
    Json(admin_service::set_active(&state, request).await)
}

/// Drop the cached catalog of a show.
#[utoipa::path(
    delete,
    path = "/admin/shows/{show_id}/catalog",
    tag = "admin",
    params(("show_id" = String, Path, description = "Show identifier")),
    responses((status = 204, description = "Catalog cache cleared"))
)]
pub async fn invalidate_catalog(
    State(state): State<SharedState>,
    Path(show_id): Path<String>,
) -> StatusCode {
    admin_service::invalidate_catalog(&state, &show_id);
    StatusCode::NO_CONTENT
}
