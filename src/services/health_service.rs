use tracing::warn;

use crate::{
    dto::health::HealthResponse, services::bounded::call_with_timeout, state::SharedState,
};

/// Report whether the remote show store is in use, logging connectivity issues.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.available_show_store().await {
        Some(store) => {
            let limit = state.config().remote_read_timeout();
            if let Err(err) = call_with_timeout("health_check", limit, store.health_check()).await {
                warn!(backend = store.backend_name(), error = %err, "storage health check failed");
            }
        }
        None => warn!("storage unavailable (degraded mode)"),
    }

    if state.is_degraded() {
        HealthResponse::degraded()
    } else {
        HealthResponse::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeShowStore, test_state};

    #[tokio::test]
    async fn reports_degraded_without_store() {
        let (state, _dir) = test_state(None).await;
        assert_eq!(health_status(&state).await.status, "degraded");
    }

    #[tokio::test]
    async fn reports_ok_with_installed_store() {
        let (state, _dir) = test_state(Some(FakeShowStore::new())).await;
        assert_eq!(health_status(&state).await.status, "ok");
    }
}
