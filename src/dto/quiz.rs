//! Payloads of the viewer routes.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::dao::models::QuestionEntity;

/// Question as exposed to viewer clients.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct QuestionDto {
    /// Question identifier.
    pub id: String,
    /// Question text.
    pub text: String,
    /// Answer choices in display order.
    pub options: Vec<String>,
    /// The right answer, one of `options`.
    pub correct: String,
}

impl From<QuestionEntity> for QuestionDto {
    fn from(question: QuestionEntity) -> Self {
        Self {
            id: question.id,
            text: question.text,
            options: question.options,
            correct: question.correct,
        }
    }
}

/// Query accepted by `/api/quiz/current`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShowQuery {
    /// Show to serve; the configured default show when omitted.
    pub show_id: Option<String>,
}

/// Active question of a show, flattened for the viewer overlay.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct CurrentQuestionResponse {
    /// Show the question belongs to.
    pub show_id: String,
    /// Human readable show name derived from the identifier.
    pub show_title: String,
    /// Question identifier.
    pub id: String,
    /// Question text.
    pub question: String,
    /// Answer choices in display order.
    pub options: Vec<String>,
    /// The right answer, one of `options`.
    pub correct: String,
}

impl CurrentQuestionResponse {
    /// Flatten `question` and derive the show title from `show_id`.
    pub fn new(show_id: &str, question: QuestionEntity) -> Self {
        Self {
            show_id: show_id.to_owned(),
            show_title: show_title(show_id),
            id: question.id,
            question: question.text,
            options: question.options,
            correct: question.correct,
        }
    }
}

/// Turn `detectivul_din_canapea` into `Detectivul Din Canapea`.
pub fn show_title(show_id: &str) -> String {
    show_id
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_title_capitalizes_each_word() {
        assert_eq!(show_title("detectivul_din_canapea"), "Detectivul Din Canapea");
        assert_eq!(show_title("MASTER_chef"), "Master Chef");
        assert_eq!(show_title("solo"), "Solo");
        assert_eq!(show_title("double__underscore_"), "Double Underscore");
    }

    #[test]
    fn current_question_flattens_the_entity() {
        let question = QuestionEntity {
            id: "q2".into(),
            text: "Cine a furat mingea?".into(),
            options: vec!["Ion".into(), "Maria".into()],
            correct: "Maria".into(),
        };

        let response = CurrentQuestionResponse::new("detectivul_din_canapea", question);

        assert_eq!(response.id, "q2");
        assert_eq!(response.question, "Cine a furat mingea?");
        assert_eq!(response.show_title, "Detectivul Din Canapea");
        assert_eq!(response.correct, "Maria");
    }
}
