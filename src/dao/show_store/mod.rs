//! Remote show store abstraction and backend selection.

/// CouchDB backend.
#[cfg(feature = "couch-store")]
pub mod couchdb;
/// MongoDB backend.
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use std::{fmt, sync::Arc, time::Duration};

use futures::future::BoxFuture;

use crate::dao::{
    models::{QuestionEntity, ShowStatusEntity},
    storage::{StorageError, StorageResult},
};

/// Environment variable selecting which remote backend to connect to.
const BACKEND_ENV: &str = "STORAGE_BACKEND";

/// Abstraction over the remote document store holding shows, catalogs and status records.
///
/// Every future is `'static` so callers can hand it to a spawned task and walk away
/// from it when it takes too long.
pub trait ShowStore: Send + Sync {
    /// Short label used in logs and diagnostics.
    fn backend_name(&self) -> &'static str;
    /// Identifiers of every known show.
    fn list_shows(&self) -> BoxFuture<'static, StorageResult<Vec<String>>>;
    /// Catalog of a show, ordered by question identifier.
    fn list_questions(&self, show_id: String)
    -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>>;
    /// Status record of a show; `None` when no admin ever set one.
    fn find_status(&self, show_id: String)
    -> BoxFuture<'static, StorageResult<Option<ShowStatusEntity>>>;
    /// Upsert the status record of `status.show_id`.
    fn save_status(&self, status: ShowStatusEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Upsert a show entry.
    fn save_show(&self, show_id: String) -> BoxFuture<'static, StorageResult<()>>;
    /// Upsert one question of a show's catalog.
    fn save_question(
        &self,
        show_id: String,
        question: QuestionEntity,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Cheap round trip proving the backend answers.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Re-establish the underlying connection in place.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Limits enforced by the backend drivers themselves.
///
/// Callers still bound each operation; these make a dead backend fail fast instead of
/// leaving driver tasks parked on server selection or a stalled socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimeouts {
    /// Opening a connection and selecting a server.
    pub connect: Duration,
    /// Whole request, for backends that support a per-request limit.
    pub request: Duration,
}

/// Remote backends this build knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// MongoDB through the official driver.
    Mongo,
    /// CouchDB over its HTTP API.
    Couch,
}

impl StorageBackend {
    /// Read the backend from `STORAGE_BACKEND`, defaulting to MongoDB when compiled in.
    pub fn from_env() -> StorageResult<Self> {
        match std::env::var(BACKEND_ENV) {
            Ok(value) => value.parse(),
            Err(_) if cfg!(feature = "mongo-store") => Ok(Self::Mongo),
            Err(_) => Ok(Self::Couch),
        }
    }

    /// Stable lowercase label used in logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mongo => "mongo",
            Self::Couch => "couch",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = StorageError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "couch" | "couchdb" => Ok(Self::Couch),
            other => Err(StorageError::Misconfigured(format!(
                "unknown storage backend `{other}`"
            ))),
        }
    }
}

/// Connect to the selected backend using its environment configuration.
pub async fn connect(
    backend: StorageBackend,
    timeouts: StoreTimeouts,
) -> StorageResult<Arc<dyn ShowStore>> {
    match backend {
        #[cfg(feature = "mongo-store")]
        StorageBackend::Mongo => {
            let config = mongodb::MongoConfig::from_env(timeouts).await?;
            let store = mongodb::MongoShowStore::connect(config).await?;
            Ok(Arc::new(store))
        }
        #[cfg(feature = "couch-store")]
        StorageBackend::Couch => {
            let config = couchdb::CouchConfig::from_env(timeouts)?;
            let store = couchdb::CouchShowStore::connect(config).await?;
            Ok(Arc::new(store))
        }
        #[allow(unreachable_patterns)]
        other => Err(StorageError::Misconfigured(format!(
            "storage backend `{other}` is not compiled into this build"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_parse_case_insensitively() {
        assert_eq!("Mongo".parse::<StorageBackend>().unwrap(), StorageBackend::Mongo);
        assert_eq!("couchdb".parse::<StorageBackend>().unwrap(), StorageBackend::Couch);
        assert!(matches!(
            "firestore".parse::<StorageBackend>(),
            Err(StorageError::Misconfigured(_))
        ));
    }
}
