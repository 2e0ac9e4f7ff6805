//! Ordering of the catalog handed to viewers.
//!
//! Clients pick a question from the head of the list, so moving the active question to
//! the front steers them to it without changing their selection logic.

use tracing::debug;

use crate::dao::models::QuestionEntity;

/// Move the first question whose id equals `active_id` to the front.
///
/// The remaining questions keep their relative order. A missing or empty `active_id`, or
/// one that matches nothing, leaves the input untouched.
pub fn reorder_with_active_first(
    mut questions: Vec<QuestionEntity>,
    active_id: Option<&str>,
) -> Vec<QuestionEntity> {
    let Some(active_id) = active_id.filter(|id| !id.is_empty()) else {
        return questions;
    };

    match questions.iter().position(|question| question.id == active_id) {
        Some(index) => questions[..=index].rotate_right(1),
        None => debug!(active_id, "active question not present in catalog; order unchanged"),
    }
    questions
}

/// First question of `questions` carrying `id`.
pub fn find_question<'a>(questions: &'a [QuestionEntity], id: &str) -> Option<&'a QuestionEntity> {
    questions.iter().find(|question| question.id == id)
}
