use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for SyncPlay Back.
#[openapi(
    paths(
        crate::routes::health::index,
        crate::routes::health::healthcheck,
        crate::routes::quiz::current_catalog,
        crate::routes::quiz::current_question,
        crate::routes::admin::overview,
        crate::routes::admin::set_active_question,
        crate::routes::admin::invalidate_catalog,
        crate::routes::scene::exclusive_scene,
        crate::routes::ai::ask,
        crate::routes::diagnostic::storage_diagnostic,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::IndexResponse,
            crate::dto::quiz::QuestionDto,
            crate::dto::quiz::CurrentQuestionResponse,
            crate::dto::admin::AdminOverview,
            crate::dto::admin::ActiveQuestionDto,
            crate::dto::admin::SetActiveQuestionRequest,
            crate::dto::admin::SetActiveQuestionResponse,
            crate::dto::ai::AskRequest,
            crate::dto::ai::AskResponse,
            crate::dto::diagnostic::DiagnosticReport,
            crate::dto::diagnostic::DiagnosticStep,
            crate::dto::diagnostic::StepStatus,
            crate::dto::diagnostic::OverallStatus,
            crate::services::active_question::ActiveSource,
            crate::services::catalog::CatalogOrigin,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "quiz", description = "Viewer quiz endpoints"),
        (name = "admin", description = "Active question administration"),
        (name = "scene", description = "Exclusive scenes"),
        (name = "ai", description = "AI co-host"),
        (name = "diagnostic", description = "Storage diagnostics"),
    )
)]
pub struct ApiDoc;
