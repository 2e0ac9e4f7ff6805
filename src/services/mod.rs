/// Active question resolution and updates across the storage tiers.
pub mod active_question;
/// Admin panel operations.
pub mod admin_service;
/// AI co-host proxy.
pub mod ai_service;
/// Time-bounded remote store calls.
pub mod bounded;
/// Question catalog cache.
pub mod catalog;
/// Storage diagnostic report.
pub mod diagnostic_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Viewer-facing quiz reads.
pub mod quiz_service;
/// Catalog ordering with the active question first.
pub mod reorder;
/// Exclusive scene lookup.
pub mod scene_service;
/// Remote show store connection supervisor.
pub mod storage_supervisor;
