use mongodb::options::ClientOptions;

use super::error::{MongoDaoError, MongoResult};
use crate::dao::show_store::StoreTimeouts;

const DEFAULT_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "syncplay";
const APP_NAME: &str = "syncplay-back";

/// Driver options and database selection for the MongoDB show store.
#[derive(Clone)]
pub struct MongoConfig {
    /// Parsed client options with the connect limits applied.
    pub options: ClientOptions,
    /// Database holding the show collections.
    pub database_name: String,
    /// Limits already applied to `options`, kept for the connect retry window.
    pub timeouts: StoreTimeouts,
}

impl MongoConfig {
    /// Parse `uri` and cap connection setup and server selection at `timeouts.connect`.
    ///
    /// Limits given in the URI are overridden; without this the driver waits 30 s for a
    /// server before failing an operation.
    pub async fn from_uri(
        uri: &str,
        db_name: Option<&str>,
        timeouts: StoreTimeouts,
    ) -> MongoResult<Self> {
        let mut options =
            ClientOptions::parse(uri)
                .await
                .map_err(|source| MongoDaoError::InvalidUri {
                    uri: uri.to_owned(),
                    source,
                })?;
        options.connect_timeout = Some(timeouts.connect);
        options.server_selection_timeout = Some(timeouts.connect);
        options.app_name.get_or_insert_with(|| APP_NAME.to_owned());

        Ok(Self {
            options,
            database_name: db_name
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_DATABASE)
                .to_owned(),
            timeouts,
        })
    }

    /// Build a configuration from `MONGO_URI` and `MONGO_DB`, both optional.
    pub async fn from_env(timeouts: StoreTimeouts) -> MongoResult<Self> {
        let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| DEFAULT_URI.into());
        let db = std::env::var("MONGO_DB").ok();
        Self::from_uri(&uri, db.as_deref(), timeouts).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const TIMEOUTS: StoreTimeouts = StoreTimeouts {
        connect: Duration::from_millis(1_500),
        request: Duration::from_secs(5),
    };

    #[tokio::test]
    async fn connect_limits_override_uri_settings() {
        let config = MongoConfig::from_uri(
            "mongodb://localhost:27017/?serverSelectionTimeoutMS=60000&connectTimeoutMS=60000",
            Some("shows_test"),
            TIMEOUTS,
        )
        .await
        .unwrap();

        assert_eq!(config.options.server_selection_timeout, Some(TIMEOUTS.connect));
        assert_eq!(config.options.connect_timeout, Some(TIMEOUTS.connect));
        assert_eq!(config.options.app_name.as_deref(), Some(APP_NAME));
        assert_eq!(config.database_name, "shows_test");
    }

    #[tokio::test]
    async fn blank_database_name_uses_default() {
        let config = MongoConfig::from_uri(DEFAULT_URI, Some(""), TIMEOUTS)
            .await
            .unwrap();

        assert_eq!(config.database_name, DEFAULT_DATABASE);
    }

    #[tokio::test]
    async fn invalid_uri_is_rejected() {
        let err = MongoConfig::from_uri("postgres://nope", None, TIMEOUTS)
            .await
            .err()
            .unwrap();

        assert!(matches!(err, MongoDaoError::InvalidUri { .. }));
    }
}
