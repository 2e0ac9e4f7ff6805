//! Failures of the MongoDB show store.

use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Result alias of the MongoDB backend.
pub type MongoResult<T> = std::result::Result<T, MongoDaoError>;

/// Failures of the MongoDB backend, one variant per driver call site.
#[derive(Debug, Error)]
pub enum MongoDaoError {
    /// The connection URI could not be parsed.
    #[error("failed to parse MongoDB connection URI `{uri}`")]
    InvalidUri {
        /// URI as configured.
        uri: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// The driver rejected the client options.
    #[error("failed to build MongoDB client from options")]
    ClientConstruction {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// No ping succeeded within the connect window.
    #[error("MongoDB ping failed during initial connection after {attempts} attempt(s)")]
    InitialPing {
        /// Pings sent before giving up.
        attempts: u32,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// A health check ping failed.
    #[error("MongoDB ping health check failed")]
    HealthPing {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// An index could not be created.
    #[error("failed to ensure index `{index}` on collection `{collection}`")]
    EnsureIndex {
        /// Target collection.
        collection: &'static str,
        /// Index name.
        index: &'static str,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Listing shows failed.
    #[error("failed to list shows")]
    ListShows {
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Loading a catalog failed.
    #[error("failed to load questions of show `{show_id}`")]
    LoadQuestions {
        /// Show concerned.
        show_id: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Loading a status record failed.
    #[error("failed to load status of show `{show_id}`")]
    LoadStatus {
        /// Show concerned.
        show_id: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Writing a status record failed.
    #[error("failed to save status of show `{show_id}`")]
    SaveStatus {
        /// Show concerned.
        show_id: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Registering a show failed.
    #[error("failed to save show `{show_id}`")]
    SaveShow {
        /// Show concerned.
        show_id: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
    /// Writing a question failed.
    #[error("failed to save question `{question_id}` of show `{show_id}`")]
    SaveQuestion {
        /// Show concerned.
        show_id: String,
        /// Question concerned.
        question_id: String,
        /// Driver error.
        #[source]
        source: MongoError,
    },
}
