use std::collections::BTreeSet;

use tracing::warn;

use crate::{
    dto::{
        admin::{
            ActiveQuestionDto, AdminOverview, SetActiveQuestionRequest, SetActiveQuestionResponse,
        },
        quiz::QuestionDto,
    },
    services::{
        active_question::{resolve_active_question, set_active_question},
        bounded::call_with_timeout,
        catalog,
    },
    state::SharedState,
};

/// Everything the admin panel shows for `show_id` (or the default show).
pub async fn overview(state: &SharedState, show_id: Option<&str>) -> AdminOverview {
    let selected_show = show_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| state.config().default_show_id())
        .to_owned();

    let (shows, snapshot, active) = tokio::join!(
        known_shows(state),
        catalog::get_catalog(state, &selected_show),
        resolve_active_question(state, &selected_show)
    );

    AdminOverview {
        shows,
        questions: snapshot.questions.into_iter().map(QuestionDto::from).collect(),
        catalog_origin: snapshot.origin,
        active: ActiveQuestionDto {
            question_id: active.question_id,
            source: active.source,
        },
        degraded: state.is_degraded(),
        selected_show,
    }
}

/// Switch the active question, reporting whether the remote store accepted it.
pub async fn set_active(
    state: &SharedState,
    request: SetActiveQuestionRequest,
) -> SetActiveQuestionResponse {
    let update = set_active_question(state, &request.show_id, &request.question_id).await;
    SetActiveQuestionResponse {
        success: update.success,
        message: update.message,
        show_id: request.show_id,
        question_id: request.question_id,
    }
}

/// Forget the cached catalog of `show_id`.
pub fn invalidate_catalog(state: &SharedState, show_id: &str) {
    catalog::invalidate(state, show_id);
}

/// Shows listed by the remote store, or the shows the local file knows about.
///
/// The default show is always part of the list.
async fn known_shows(state: &SharedState) -> Vec<String> {
    let mut shows = BTreeSet::from([state.config().default_show_id().to_owned()]);

    let remote = match state.available_show_store().await {
        Some(store) => {
            let limit = state.config().remote_read_timeout();
            call_with_timeout("list_shows", limit, store.list_shows())
                .await
                .map_err(|err| warn!(error = %err, "listing shows failed; using local entries"))
                .ok()
        }
        None => None,
    };

    match remote {
        Some(remote_shows) => shows.extend(remote_shows),
        None => shows.extend(state.local_store().entries().into_keys()),
    }
    shows.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{active_question::ActiveSource, catalog::CatalogOrigin},
        test_support::{Behavior, FakeShowStore, question, test_state},
    };

    #[tokio::test]
    async fn overview_lists_remote_shows_and_active_question() {
        let store = FakeShowStore::new();
        store.set_questions("master_chef", vec![question("q1"), question("q2")]);
        store.set_questions("vocea_romaniei", vec![question("q1")]);
        store.set_status("master_chef", Some("q2"));
        let (state, _dir) = test_state(Some(store)).await;

        let overview = overview(&state, Some("master_chef")).await;

        assert_eq!(
            overview.shows,
            ["detectivul_din_canapea", "master_chef", "vocea_romaniei"]
        );
        assert_eq!(overview.selected_show, "master_chef");
        assert_eq!(overview.questions.len(), 2);
        assert_eq!(overview.catalog_origin, CatalogOrigin::Remote);
        assert_eq!(overview.active.question_id, "q2");
        assert_eq!(overview.active.source, ActiveSource::Remote);
        assert!(!overview.degraded);
    }

    #[tokio::test]
    async fn overview_falls_back_to_local_shows_when_remote_fails() {
        let store = FakeShowStore::new();
        let (state, _dir) = test_state(Some(store.clone())).await;
        state.local_store().put("vocea_romaniei", "q4").unwrap();
        store.set_behavior(Behavior::Failing);

        let overview = overview(&state, None).await;

        assert_eq!(overview.shows, ["detectivul_din_canapea", "vocea_romaniei"]);
        assert_eq!(overview.selected_show, "detectivul_din_canapea");
        assert_eq!(overview.catalog_origin, CatalogOrigin::Placeholder);
        assert_eq!(overview.active.source, ActiveSource::Local);
    }

    #[tokio::test]
    async fn set_active_echoes_the_request() {
        let (state, _dir) = test_state(Some(FakeShowStore::new())).await;

        let response = set_active(
            &state,
            SetActiveQuestionRequest {
                show_id: "master_chef".into(),
                question_id: "q3".into(),
            },
        )
        .await;

        assert!(response.success);
        assert!(response.message.is_none());
        assert_eq!(response.show_id, "master_chef");
        assert_eq!(response.question_id, "q3");
    }
}
