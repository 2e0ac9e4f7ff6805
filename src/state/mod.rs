//! Shared application state handed to every handler and service.

/// Catalog cache kept in memory.
pub mod catalog;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tracing::{info, warn};

use crate::{
    config::AppConfig, dao::local_store::LocalActiveStore, dao::show_store::ShowStore,
    services::ai_service::GeminiClient,
};

pub use self::catalog::{CacheEntry, CatalogCache};

/// Handle cloned into every handler.
pub type SharedState = Arc<AppState>;

/// Central application state: storage handles, fallback tiers and caches.
///
/// Nothing here is ambient; every service receives the state it works on.
pub struct AppState {
    config: AppConfig,
    show_store: RwLock<Option<Arc<dyn ShowStore>>>,
    degraded: watch::Sender<bool>,
    local_store: LocalActiveStore,
    catalog: CatalogCache,
    ai: Option<GeminiClient>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a show store is installed.
    pub fn new(config: AppConfig, ai: Option<GeminiClient>) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        let local_store = LocalActiveStore::new(
            config.local_store_path().clone(),
            config.default_question_id(),
        );
        let catalog = CatalogCache::new(config.catalog_ttl());

        Arc::new(Self {
            config,
            show_store: RwLock::new(None),
            degraded: degraded_tx,
            local_store,
            catalog,
            ai,
        })
    }

    /// Configuration loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current show store, if one is installed.
    pub async fn show_store(&self) -> Option<Arc<dyn ShowStore>> {
        let guard = self.show_store.read().await;
        guard.as_ref().cloned()
    }

    /// Show store worth calling: installed and not known to be failing.
    ///
    /// Callers skip the remote tier entirely when this is `None` instead of waiting out
    /// a timeout against a backend the supervisor already flagged.
    pub async fn available_show_store(&self) -> Option<Arc<dyn ShowStore>> {
        if self.is_degraded() {
            return None;
        }
        self.show_store().await
    }

    /// Install a new show store implementation and leave degraded mode.
    pub async fn install_show_store(&self, store: Arc<dyn ShowStore>) {
        {
            let mut guard = self.show_store.write().await;
            *guard = Some(store);
        }
        self.set_degraded(false);
    }

    /// Remove the current show store and enter degraded mode.
    pub async fn clear_show_store(&self) {
        {
            let mut guard = self.show_store.write().await;
            guard.take();
        }
        self.set_degraded(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Update the degraded flag, logging transitions.
    pub fn set_degraded(&self, value: bool) {
        let previous = self.degraded.send_replace(value);
        if previous != value {
            if value {
                warn!("entering degraded mode; remote show store bypassed");
            } else {
                info!("leaving degraded mode");
            }
        }
    }

    /// Local durable fallback for active questions.
    pub fn local_store(&self) -> &LocalActiveStore {
        &self.local_store
    }

    /// Question catalogs cached per show.
    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    /// Client of the text-generation API, when configured.
    pub fn ai(&self) -> Option<&GeminiClient> {
        self.ai.as_ref()
    }
}
