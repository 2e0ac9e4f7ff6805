//! Payloads of the admin panel routes.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    dto::{quiz::QuestionDto, validation::validate_identifier},
    services::{active_question::ActiveSource, catalog::CatalogOrigin},
};

/// Query accepted by `GET /admin`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdminQuery {
    /// Show to inspect; the configured default show when omitted.
    pub show_id: Option<String>,
}

/// Active question of the inspected show and the tier that supplied it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActiveQuestionDto {
    /// Identifier of the active question.
    pub question_id: String,
    /// Storage tier that answered.
    pub source: ActiveSource,
}

/// Everything the admin panel needs to render a show.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminOverview {
    /// Known shows, sorted.
    pub shows: Vec<String>,
    /// Show the overview describes.
    pub selected_show: String,
    /// Catalog of the selected show, active question first.
    pub questions: Vec<QuestionDto>,
    /// Where the catalog came from.
    pub catalog_origin: CatalogOrigin,
    /// Active question of the selected show.
    pub active: ActiveQuestionDto,
    /// True while the remote show store is bypassed.
    pub degraded: bool,
}

/// Body of `POST /admin`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SetActiveQuestionRequest {
    /// Show whose active question changes.
    #[validate(custom(function = "validate_identifier"))]
    pub show_id: String,
    /// Question to make active.
    #[validate(custom(function = "validate_identifier"))]
    pub question_id: String,
}

/// Outcome of `POST /admin`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SetActiveQuestionResponse {
    /// True only when the remote show store accepted the change.
    pub success: bool,
    /// Why the remote write failed, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Echo of the requested show.
    pub show_id: String,
    /// Echo of the requested question.
    pub question_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_active_request_rejects_bad_identifiers() {
        let valid = SetActiveQuestionRequest {
            show_id: "master_chef".into(),
            question_id: "q2".into(),
        };
        assert!(valid.validate().is_ok());

        let invalid = SetActiveQuestionRequest {
            show_id: "master chef".into(),
            question_id: String::new(),
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("show_id"));
        assert!(fields.contains_key("question_id"));
    }
}
