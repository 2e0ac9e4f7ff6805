use tracing::debug;

use crate::{
    dto::quiz::{CurrentQuestionResponse, QuestionDto},
    error::ServiceError,
    services::{
        active_question::resolve_active_question,
        catalog::get_catalog,
        reorder::{find_question, reorder_with_active_first},
    },
    state::SharedState,
};

/// Catalog of `show_id` (or the default show) with the active question first.
pub async fn current_catalog(state: &SharedState, show_id: Option<&str>) -> Vec<QuestionDto> {
    let show_id = show_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| state.config().default_show_id());

    let (active, catalog) = tokio::join!(
        resolve_active_question(state, show_id),
        get_catalog(state, show_id)
    );
    debug!(
        show_id,
        active = %active.question_id,
        source = ?active.source,
        origin = ?catalog.origin,
        "serving current catalog"
    );

    reorder_with_active_first(catalog.questions, Some(&active.question_id))
        .into_iter()
        .map(QuestionDto::from)
        .collect()
}

/// Active question of `show_id`, failing when it is missing from the catalog.
pub async fn current_question(
    state: &SharedState,
    show_id: &str,
) -> Result<CurrentQuestionResponse, ServiceError> {
    let (active, catalog) = tokio::join!(
        resolve_active_question(state, show_id),
        get_catalog(state, show_id)
    );

    let question = find_question(&catalog.questions, &active.question_id)
        .cloned()
        .ok_or_else(|| {
            ServiceError::NotFound(format!(
                "question `{}` not found for show `{show_id}`",
                active.question_id
            ))
        })?;

    Ok(CurrentQuestionResponse::new(show_id, question))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::active_question::set_active_question,
        test_support::{FakeShowStore, question, test_state},
    };

    #[tokio::test]
    async fn current_catalog_puts_active_question_first() {
        let store = FakeShowStore::new();
        store.set_questions(
            "detectivul_din_canapea",
            vec![question("q1"), question("q2"), question("q3")],
        );
        store.set_status("detectivul_din_canapea", Some("q3"));
        let (state, _dir) = test_state(Some(store)).await;

        let questions = current_catalog(&state, None).await;

        let ids: Vec<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["q3", "q1", "q2"]);
    }

    #[tokio::test]
    async fn current_catalog_without_any_storage_serves_placeholders() {
        let (state, _dir) = test_state(None).await;

        let questions = current_catalog(&state, Some("master_chef")).await;

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].id, "q1");
    }

    #[tokio::test]
    async fn current_question_reports_the_active_entry() {
        let store = FakeShowStore::new();
        store.set_questions("master_chef", vec![question("q1"), question("q2")]);
        let (state, _dir) = test_state(Some(store)).await;
        set_active_question(&state, "master_chef", "q2").await;

        let response = current_question(&state, "master_chef").await.unwrap();

        assert_eq!(response.id, "q2");
        assert_eq!(response.question, "Question q2?");
        assert_eq!(response.show_title, "Master Chef");
    }

    #[tokio::test]
    async fn current_question_missing_from_catalog_is_not_found() {
        let store = FakeShowStore::new();
        store.set_questions("master_chef", vec![question("q1"), question("q2")]);
        store.set_status("master_chef", Some("q9"));
        let (state, _dir) = test_state(Some(store)).await;

        let err = current_question(&state, "master_chef").await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(message) if message.contains("q9")));
    }
}
