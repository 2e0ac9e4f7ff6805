use mongodb::bson::{DateTime, Document, doc};
use serde::{Deserialize, Serialize};

use crate::dao::models::{QuestionEntity, ShowStatusEntity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoShowDocument {
    #[serde(rename = "_id")]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoQuestionDocument {
    show_id: String,
    question_id: String,
    text: String,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct: String,
}

impl From<(String, QuestionEntity)> for MongoQuestionDocument {
    fn from((show_id, question): (String, QuestionEntity)) -> Self {
        Self {
            show_id,
            question_id: question.id,
            text: question.text,
            options: question.options,
            correct: question.correct,
        }
    }
}

impl From<MongoQuestionDocument> for QuestionEntity {
    fn from(value: MongoQuestionDocument) -> Self {
        Self {
            id: value.question_id,
            text: value.text,
            options: value.options,
            correct: value.correct,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoStatusDocument {
    #[serde(rename = "_id")]
    show_id: String,
    current_question_id: Option<String>,
    updated_at: DateTime,
}

impl From<ShowStatusEntity> for MongoStatusDocument {
    fn from(value: ShowStatusEntity) -> Self {
        Self {
            show_id: value.show_id,
            current_question_id: value.current_question_id,
            updated_at: DateTime::from_system_time(value.updated_at),
        }
    }
}

impl From<MongoStatusDocument> for ShowStatusEntity {
    fn from(value: MongoStatusDocument) -> Self {
        Self {
            show_id: value.show_id,
            current_question_id: value.current_question_id,
            updated_at: value.updated_at.to_system_time(),
        }
    }
}

pub fn doc_id(id: &str) -> Document {
    doc! {"_id": id}
}

pub fn question_key(show_id: &str, question_id: &str) -> Document {
    doc! {"show_id": show_id, "question_id": question_id}
}
