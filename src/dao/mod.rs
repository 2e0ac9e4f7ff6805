/// Local durable fallback for the active question of each show.
pub mod local_store;
/// Database model definitions.
pub mod models;
/// Remote show storage and retrieval operations.
pub mod show_store;
/// Storage abstraction layer for database operations.
pub mod storage;
