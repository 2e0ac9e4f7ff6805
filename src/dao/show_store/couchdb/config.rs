//! Connection settings for the CouchDB show store.

use super::error::{CouchDaoError, CouchResult};
use crate::dao::show_store::StoreTimeouts;

const DEFAULT_BASE_URL: &str = "http://localhost:5984";
const DEFAULT_DATABASE: &str = "syncplay";

/// Where the show database lives and how long requests to it may take.
#[derive(Debug, Clone)]
pub struct CouchConfig {
    /// Server root, without the database segment.
    pub base_url: String,
    /// Database holding shows, questions and statuses.
    pub database: String,
    /// Basic-auth user, sent only together with `password`.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Limits handed to the HTTP client.
    pub timeouts: StoreTimeouts,
}

impl CouchConfig {
    /// Validate `base_url` and build a configuration without credentials.
    pub fn new(
        base_url: impl Into<String>,
        database: impl Into<String>,
        timeouts: StoreTimeouts,
    ) -> CouchResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CouchDaoError::InvalidBaseUrl { url: base_url });
        }
        let database = database.into();
        Ok(Self {
            base_url,
            database: if database.is_empty() {
                DEFAULT_DATABASE.to_owned()
            } else {
                database
            },
            username: None,
            password: None,
            timeouts,
        })
    }

    /// Attach basic-auth credentials.
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Read `COUCH_BASE_URL`, `COUCH_DB` and the optional `COUCH_USERNAME`/`COUCH_PASSWORD`
    /// pair, falling back to a local server.
    pub fn from_env(timeouts: StoreTimeouts) -> CouchResult<Self> {
        let base_url =
            std::env::var("COUCH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let database = std::env::var("COUCH_DB").unwrap_or_default();
        let config = Self::new(base_url, database, timeouts)?;

        Ok(
            match (
                std::env::var("COUCH_USERNAME").ok(),
                std::env::var("COUCH_PASSWORD").ok(),
            ) {
                (Some(username), Some(password)) => config.with_credentials(username, password),
                _ => config,
            },
        )
    }
}
