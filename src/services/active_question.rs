//! Resolution and update of the question currently live for a show.
//!
//! Reads favour availability: they always produce an identifier, falling back from the
//! remote store to the local file and finally to the default question. Writes always
//! mirror to the local file but only report success when the remote store accepted them.

use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::{
    dao::models::ShowStatusEntity, error::ServiceError, services::bounded::call_with_timeout,
    state::SharedState,
};

/// Storage tier that produced an active question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActiveSource {
    /// The remote show store answered in time.
    Remote,
    /// The local fallback file, memory copy or default answered.
    Local,
}

/// Active question of a show together with the tier that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedActiveQuestion {
    /// Identifier of the active question, never empty.
    pub question_id: String,
    /// Tier that supplied it.
    pub source: ActiveSource,
}

/// Result of an admin switching the active question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuestionUpdate {
    /// True only when the remote store accepted the write within its limit.
    pub success: bool,
    /// Why the remote write failed, or what went wrong locally.
    pub message: Option<String>,
}

/// Return the active question of `show_id`. Never fails.
pub async fn resolve_active_question(state: &SharedState, show_id: &str) -> ResolvedActiveQuestion {
    if let Some(store) = state.available_show_store().await {
        let limit = state.config().remote_read_timeout();
        match call_with_timeout("find_status", limit, store.find_status(show_id.to_owned())).await
        {
            Ok(status) => {
                let question_id = status
                    .and_then(|status| status.current_question_id)
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| state.config().default_question_id().to_owned());
                debug!(show_id, question_id = %question_id, "resolved active question from remote store");
                return ResolvedActiveQuestion {
                    question_id,
                    source: ActiveSource::Remote,
                };
            }
            Err(err) => {
                warn!(show_id, error = %err, "remote active question unavailable; using local fallback");
            }
        }
    }

    ResolvedActiveQuestion {
        question_id: state.local_store().get(show_id),
        source: ActiveSource::Local,
    }
}

/// Make `question_id` the active question of `show_id`.
///
/// The local mirror is written whatever the remote outcome, so viewers keep following
/// the admin while the remote store is down even though the write reports failure.
pub async fn set_active_question(
    state: &SharedState,
    show_id: &str,
    question_id: &str,
) -> ActiveQuestionUpdate {
    let remote = match state.available_show_store().await {
        Some(store) => {
            let limit = state.config().remote_write_timeout();
            let status = ShowStatusEntity::activate(show_id, question_id);
            call_with_timeout("save_status", limit, store.save_status(status))
                .await
                .map_err(|err| err.to_string())
        }
        None => Err(ServiceError::Degraded.to_string()),
    };

    let local = state.local_store().put(show_id, question_id);
    if let Err(err) = &local {
        warn!(show_id, question_id, error = %err, "failed to mirror active question locally");
    }

    let update = match (remote, local) {
        (Ok(()), Ok(())) => ActiveQuestionUpdate {
            success: true,
            message: None,
        },
        (Ok(()), Err(local_err)) => ActiveQuestionUpdate {
            success: true,
            message: Some(format!("local mirror failed: {local_err}")),
        },
        (Err(remote_err), Ok(())) => ActiveQuestionUpdate {
            success: false,
            message: Some(remote_err),
        },
        (Err(remote_err), Err(local_err)) => ActiveQuestionUpdate {
            success: false,
            message: Some(format!("{remote_err}; local mirror failed: {local_err}")),
        },
    };

    if update.success {
        info!(show_id, question_id, "active question updated");
    } else {
        warn!(
            show_id,
            question_id,
            reason = update.message.as_deref().unwrap_or_default(),
            "active question only mirrored locally"
        );
    }
    update
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Behavior, FakeShowStore, test_state};

    #[tokio::test]
    async fn answers_default_without_remote_or_local_data() {
        let (state, _dir) = test_state(None).await;

        let resolved = resolve_active_question(&state, "vocea_romaniei").await;

        assert_eq!(resolved.question_id, "q1");
        assert_eq!(resolved.source, ActiveSource::Local);
    }

    #[tokio::test]
    async fn answers_default_when_remote_fails_and_no_file_exists() {
        let store = FakeShowStore::new();
        store.set_behavior(Behavior::Failing);
        let (state, _dir) = test_state(Some(store)).await;

        let resolved = resolve_active_question(&state, "master_chef").await;

        assert_eq!(resolved.question_id, "q1");
        assert!(!state.local_store().path().exists());
    }

    #[tokio::test]
    async fn successful_write_reaches_both_tiers() {
        let store = FakeShowStore::new();
        let (state, _dir) = test_state(Some(store.clone())).await;

        let update = set_active_question(&state, "master_chef", "q3").await;

        assert_eq!(
            update,
            ActiveQuestionUpdate {
                success: true,
                message: None
            }
        );
        let remote = store.status_of("master_chef").unwrap();
        assert_eq!(remote.current_question_id.as_deref(), Some("q3"));
        assert_eq!(state.local_store().get("master_chef"), "q3");

        let resolved = resolve_active_question(&state, "master_chef").await;
        assert_eq!(resolved.question_id, "q3");
        assert_eq!(resolved.source, ActiveSource::Remote);
    }

    #[tokio::test]
    async fn write_during_remote_outage_reports_failure_but_stays_visible() {
        let store = FakeShowStore::new();
        store.set_behavior(Behavior::Failing);
        let (state, _dir) = test_state(Some(store.clone())).await;

        let update = set_active_question(&state, "master_chef", "q2").await;

        assert!(!update.success);
        assert!(update.message.unwrap().contains("save_status failed"));
        assert!(store.status_of("master_chef").is_none());

        let resolved = resolve_active_question(&state, "master_chef").await;
        assert_eq!(resolved.question_id, "q2");
        assert_eq!(resolved.source, ActiveSource::Local);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_remote_write_times_out_and_mirrors_locally() {
        let store = FakeShowStore::new();
        store.set_behavior(Behavior::Hanging);
        let (state, _dir) = test_state(Some(store)).await;

        let update = set_active_question(&state, "detectivul_din_canapea", "q4").await;

        assert!(!update.success);
        assert!(update.message.unwrap().contains("timed out"));
        let resolved = resolve_active_question(&state, "detectivul_din_canapea").await;
        assert_eq!(resolved.question_id, "q4");
        assert_eq!(resolved.source, ActiveSource::Local);
    }

    #[tokio::test]
    async fn remote_record_without_question_yields_default() {
        let store = FakeShowStore::new();
        store.set_status("master_chef", None);
        let (state, _dir) = test_state(Some(store)).await;

        let resolved = resolve_active_question(&state, "master_chef").await;

        assert_eq!(resolved.question_id, "q1");
        assert_eq!(resolved.source, ActiveSource::Remote);
    }

    #[tokio::test]
    async fn degraded_mode_skips_the_remote_store() {
        let store = FakeShowStore::new();
        store.set_status("master_chef", Some("q9"));
        let (state, _dir) = test_state(Some(store.clone())).await;
        state.set_degraded(true);

        let update = set_active_question(&state, "master_chef", "q2").await;
        let resolved = resolve_active_question(&state, "master_chef").await;

        assert_eq!(store.calls(), 0);
        assert!(!update.success);
        assert_eq!(
            update.message.as_deref(),
            Some("storage unavailable (degraded mode)")
        );
        assert_eq!(resolved.question_id, "q2");
        assert_eq!(resolved.source, ActiveSource::Local);
    }
}
