use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{show_store::ShowStore, storage::StorageError},
    services::bounded::call_with_timeout,
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Keep a remote show store installed, switching the state to degraded mode while it is unreachable.
///
/// While degraded, request handlers skip the remote tier entirely and answer from the local file
/// and caches.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn ShowStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        match connect().await {
            Ok(store) => {
                info!(backend = store.backend_name(), "show store connected; leaving degraded mode");
                state.install_show_store(store.clone()).await;
                delay = INITIAL_DELAY;

                supervise(&state, store.as_ref()).await;

                warn!("exhausted show store reconnect attempts; reconnecting from scratch");
                state.clear_show_store().await;
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
            Err(err) => {
                warn!(error = %err, "show store connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }
}

/// Poll `store` until it stays unhealthy through every reconnect attempt.
async fn supervise(state: &SharedState, store: &dyn ShowStore) {
    loop {
        let limit = state.config().remote_read_timeout();
        match call_with_timeout("health_check", limit, store.health_check()).await {
            Ok(()) => {
                if state.is_degraded() {
                    info!("show store healthy again");
                    state.set_degraded(false);
                }
                sleep(HEALTH_POLL_INTERVAL).await;
            }
            Err(err) => {
                warn!(error = %err, "show store health check failed; entering degraded mode");
                state.set_degraded(true);
                if !reconnect(state, store).await {
                    return;
                }
                state.set_degraded(false);
                sleep(HEALTH_POLL_INTERVAL).await;
            }
        }
    }
}

/// Retry the store's own reconnect, each attempt bounded by the configured reconnect limit.
async fn reconnect(state: &SharedState, store: &dyn ShowStore) -> bool {
    let mut reconnect_delay = INITIAL_DELAY;
    let limit = state.config().reconnect_timeout();

    for attempt in 0..MAX_RECONNECT_ATTEMPTS {
        match call_with_timeout("try_reconnect", limit, store.try_reconnect()).await {
            Ok(()) => {
                info!(attempt, "show store reconnection succeeded");
                return true;
            }
            Err(err) => {
                warn!(attempt, error = %err, "show store reconnect attempt failed");
                sleep(reconnect_delay).await;
                reconnect_delay = (reconnect_delay * 2).min(MAX_DELAY);
            }
        }
    }
    false
}
