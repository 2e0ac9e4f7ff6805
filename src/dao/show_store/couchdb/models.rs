use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dao::models::{QuestionEntity, ShowStatusEntity};

pub const SHOW_PREFIX: &str = "show::";
pub const QUESTION_PREFIX: &str = "question::";
pub const STATUS_PREFIX: &str = "status::";
pub const END_SUFFIX: &str = "\u{ffff}";

#[derive(Debug, Deserialize)]
pub struct AllDocsResponse {
    pub rows: Vec<AllDocsRow>,
}

#[derive(Debug, Deserialize)]
pub struct AllDocsRow {
    pub id: String,
    #[serde(default)]
    pub doc: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchShowDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    pub show_id: String,
}

impl CouchShowDocument {
    pub fn new(show_id: String) -> Self {
        Self {
            id: show_doc_id(&show_id),
            rev: None,
            show_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchQuestionDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub question: QuestionBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBody {
    pub show_id: String,
    pub question_id: String,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct: String,
}

impl From<(String, QuestionEntity)> for CouchQuestionDocument {
    fn from((show_id, question): (String, QuestionEntity)) -> Self {
        Self {
            id: question_doc_id(&show_id, &question.id),
            rev: None,
            question: QuestionBody {
                show_id,
                question_id: question.id,
                text: question.text,
                options: question.options,
                correct: question.correct,
            },
        }
    }
}

impl From<CouchQuestionDocument> for QuestionEntity {
    fn from(doc: CouchQuestionDocument) -> Self {
        Self {
            id: doc.question.question_id,
            text: doc.question.text,
            options: doc.question.options,
            correct: doc.question.correct,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchStatusDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(flatten)]
    pub status: StatusBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBody {
    pub show_id: String,
    pub current_question_id: Option<String>,
    pub updated_at: SystemTime,
}

impl From<ShowStatusEntity> for CouchStatusDocument {
    fn from(value: ShowStatusEntity) -> Self {
        Self {
            id: status_doc_id(&value.show_id),
            rev: None,
            status: StatusBody {
                show_id: value.show_id,
                current_question_id: value.current_question_id,
                updated_at: value.updated_at,
            },
        }
    }
}

impl From<CouchStatusDocument> for ShowStatusEntity {
    fn from(doc: CouchStatusDocument) -> Self {
        Self {
            show_id: doc.status.show_id,
            current_question_id: doc.status.current_question_id,
            updated_at: doc.status.updated_at,
        }
    }
}

pub fn show_doc_id(show_id: &str) -> String {
    format!("{SHOW_PREFIX}{show_id}")
}

/// Prefix shared by every question document of `show_id`.
pub fn question_prefix(show_id: &str) -> String {
    format!("{QUESTION_PREFIX}{show_id}::")
}

pub fn question_doc_id(show_id: &str, question_id: &str) -> String {
    format!("{}{question_id}", question_prefix(show_id))
}

pub fn status_doc_id(show_id: &str) -> String {
    format!("{STATUS_PREFIX}{show_id}")
}
