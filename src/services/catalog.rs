//! Question catalogs served to viewers, with a stale-preferred refresh policy.
//!
//! A fresh cache entry is served as is. Past its ttl the catalog is refetched under a
//! time limit; when that fails the last known catalog is served however old it is, and
//! only a show never fetched successfully falls back to the built-in placeholders.

use serde::Serialize;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

use crate::{dao::models::QuestionEntity, services::bounded::call_with_timeout, state::SharedState};

/// Where the questions of a [`CatalogSnapshot`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOrigin {
    /// Fresh cache entry.
    Cache,
    /// Fetched from the remote store during this call.
    Remote,
    /// Expired cache entry kept because the refresh failed.
    Stale,
    /// Built-in questions.
    Placeholder,
}

/// Questions of a show and their origin.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    /// Questions in catalog order.
    pub questions: Vec<QuestionEntity>,
    /// Tier that supplied them.
    pub origin: CatalogOrigin,
}

/// Return the catalog of `show_id`. Never fails.
pub async fn get_catalog(state: &SharedState, show_id: &str) -> CatalogSnapshot {
    if let Some(questions) = state.catalog().fresh(show_id) {
        debug!(show_id, "serving cached catalog");
        return CatalogSnapshot {
            questions,
            origin: CatalogOrigin::Cache,
        };
    }

    let fetched = match state.available_show_store().await {
        Some(store) => {
            let limit = state.config().catalog_timeout();
            call_with_timeout("list_questions", limit, store.list_questions(show_id.to_owned()))
                .await
                .map_err(|err| err.to_string())
        }
        None => Err("remote store bypassed (degraded mode)".to_owned()),
    };

    match fetched {
        Ok(questions) => {
            info!(show_id, count = questions.len(), "catalog refreshed");
            state.catalog().replace(show_id, questions.clone());
            CatalogSnapshot {
                questions,
                origin: CatalogOrigin::Remote,
            }
        }
        Err(reason) => match state.catalog().last_known(show_id) {
            Some(questions) => {
                warn!(show_id, %reason, "catalog refresh failed; serving stale catalog");
                CatalogSnapshot {
                    questions,
                    origin: CatalogOrigin::Stale,
                }
            }
            None => {
                warn!(show_id, %reason, "no catalog available; serving placeholders");
                CatalogSnapshot {
                    questions: placeholder_questions(),
                    origin: CatalogOrigin::Placeholder,
                }
            }
        },
    }
}

/// Drop the cached catalog of `show_id` so the next read refetches it.
pub fn invalidate(state: &SharedState, show_id: &str) -> bool {
    let existed = state.catalog().invalidate(show_id);
    info!(show_id, existed, "catalog cache invalidated");
    existed
}

/// Built-in questions served while no real catalog has ever been fetched.
pub fn placeholder_questions() -> Vec<QuestionEntity> {
    [
        (
            "q1",
            "Who stole the ball?",
            ["The gardener", "The neighbour", "The dog"],
            "The dog",
        ),
        (
            "q2",
            "Where was the ball last seen?",
            ["In the garden", "Under the sofa", "On the roof"],
            "Under the sofa",
        ),
        (
            "q3",
            "What time did the detective arrive?",
            ["At noon", "At midnight", "At dawn"],
            "At midnight",
        ),
    ]
    .into_iter()
    .map(|(id, text, options, correct)| QuestionEntity {
        id: id.to_owned(),
        text: text.to_owned(),
        options: options.map(str::to_owned).to_vec(),
        correct: correct.to_owned(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_support::{Behavior, FakeShowStore, question, test_state};

    fn ids(snapshot: &CatalogSnapshot) -> Vec<&str> {
        snapshot.questions.iter().map(|q| q.id.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_entry_is_served_without_remote_call() {
        let store = FakeShowStore::new();
        store.set_questions("master_chef", vec![question("q1"), question("q2")]);
        let (state, _dir) = test_state(Some(store.clone())).await;

        let first = get_catalog(&state, "master_chef").await;
        let second = get_catalog(&state, "master_chef").await;

        assert_eq!(first.origin, CatalogOrigin::Remote);
        assert_eq!(second.origin, CatalogOrigin::Cache);
        assert_eq!(ids(&second), ["q1", "q2"]);
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_refetched() {
        let store = FakeShowStore::new();
        store.set_questions("master_chef", vec![question("q1")]);
        let (state, _dir) = test_state(Some(store.clone())).await;
        get_catalog(&state, "master_chef").await;

        store.set_questions("master_chef", vec![question("q1"), question("q7")]);
        tokio::time::advance(state.config().catalog_ttl() + Duration::from_secs(1)).await;
        let refreshed = get_catalog(&state, "master_chef").await;

        assert_eq!(refreshed.origin, CatalogOrigin::Remote);
        assert_eq!(ids(&refreshed), ["q1", "q7"]);
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_catalog_preferred_over_placeholders_when_remote_hangs() {
        let store = FakeShowStore::new();
        store.set_questions("master_chef", vec![question("q5"), question("q6")]);
        let (state, _dir) = test_state(Some(store.clone())).await;
        get_catalog(&state, "master_chef").await;

        store.set_behavior(Behavior::Hanging);
        tokio::time::advance(state.config().catalog_ttl()).await;
        let snapshot = get_catalog(&state, "master_chef").await;

        assert_eq!(snapshot.origin, CatalogOrigin::Stale);
        assert_eq!(ids(&snapshot), ["q5", "q6"]);
    }

    #[tokio::test]
    async fn placeholders_served_when_nothing_was_ever_fetched() {
        let store = FakeShowStore::new();
        store.set_behavior(Behavior::Failing);
        let (state, _dir) = test_state(Some(store)).await;

        let snapshot = get_catalog(&state, "master_chef").await;

        assert_eq!(snapshot.origin, CatalogOrigin::Placeholder);
        assert_eq!(ids(&snapshot), ["q1", "q2", "q3"]);
        assert!(state.catalog().last_known("master_chef").is_none());
    }

    #[tokio::test]
    async fn empty_remote_catalog_is_kept() {
        let store = FakeShowStore::new();
        let (state, _dir) = test_state(Some(store)).await;

        let snapshot = get_catalog(&state, "unknown_show").await;

        assert_eq!(snapshot.origin, CatalogOrigin::Remote);
        assert!(snapshot.questions.is_empty());
        assert_eq!(get_catalog(&state, "unknown_show").await.origin, CatalogOrigin::Cache);
    }

    #[tokio::test]
    async fn invalidated_catalog_is_refetched() {
        let store = FakeShowStore::new();
        store.set_questions("master_chef", vec![question("q1")]);
        let (state, _dir) = test_state(Some(store.clone())).await;
        get_catalog(&state, "master_chef").await;

        assert!(invalidate(&state, "master_chef"));
        let snapshot = get_catalog(&state, "master_chef").await;

        assert_eq!(snapshot.origin, CatalogOrigin::Remote);
        assert_eq!(store.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn degraded_mode_skips_remote_refresh() {
        let store = FakeShowStore::new();
        store.set_questions("master_chef", vec![question("q1")]);
        let (state, _dir) = test_state(Some(store.clone())).await;
        get_catalog(&state, "master_chef").await;
        state.set_degraded(true);
        tokio::time::advance(state.config().catalog_ttl()).await;

        let stale = get_catalog(&state, "master_chef").await;
        let missing = get_catalog(&state, "other_show").await;

        assert_eq!(stale.origin, CatalogOrigin::Stale);
        assert_eq!(missing.origin, CatalogOrigin::Placeholder);
        assert_eq!(store.calls(), 1);
    }
}
