//! HTTP routes grouped by audience.

use axum::Router;

use crate::state::SharedState;

/// Admin panel.
pub mod admin;
/// AI co-host.
pub mod ai;
/// Storage diagnostic.
pub mod diagnostic;
/// OpenAPI document and Swagger UI.
pub mod docs;
/// Liveness.
pub mod health;
/// Viewer quiz.
pub mod quiz;
/// Exclusive scenes.
pub mod scene;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(quiz::router())
        .merge(admin::router())
        .merge(scene::router())
        .merge(ai::router())
        .merge(diagnostic::router());

    api_router.merge(docs::router()).with_state(state)
}
