//! Records shared by every show store backend.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Quiz question belonging to a show's catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionEntity {
    /// Identifier unique within the show (e.g. "q1").
    pub id: String,
    /// Question asked to viewers.
    pub text: String,
    /// Answers offered to viewers, in display order.
    #[serde(default)]
    pub options: Vec<String>,
    /// The option considered correct.
    #[serde(default)]
    pub correct: String,
}

/// Remote copy of a show's active question pointer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowStatusEntity {
    /// Show the record belongs to.
    pub show_id: String,
    /// Question currently live, if the record carries one.
    pub current_question_id: Option<String>,
    /// Last time an admin changed the record.
    pub updated_at: SystemTime,
}

impl ShowStatusEntity {
    /// Build a status record pointing at `question_id`, stamped with the current time.
    pub fn activate(show_id: impl Into<String>, question_id: impl Into<String>) -> Self {
        Self {
            show_id: show_id.into(),
            current_question_id: Some(question_id.into()),
            updated_at: SystemTime::now(),
        }
    }
}
