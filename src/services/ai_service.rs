//! AI co-host answering audience questions through the Gemini REST API.

use std::{env, sync::Arc, time::Duration};

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{dto::ai::AskResponse, error::ServiceError, state::SharedState};

const API_KEY_ENV: &str = "GEMINI_API_KEY";
const MODEL_ENV: &str = "GEMINI_MODEL";
const DEFAULT_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures raised while talking to the text-generation API.
#[derive(Debug, Error)]
pub enum AiError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    ClientBuilder {
        /// Underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },
    /// The request never got an answer.
    #[error("request to model `{model}` failed")]
    Request {
        /// Model that was asked.
        model: String,
        /// Underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status.
    #[error("model `{model}` answered with status {status}")]
    Status {
        /// Model that was asked.
        model: String,
        /// Status returned by the API.
        status: StatusCode,
    },
    /// The answer was not the expected JSON.
    #[error("failed to decode answer of model `{model}`")]
    Decode {
        /// Model that was asked.
        model: String,
        /// Underlying HTTP error.
        #[source]
        source: reqwest::Error,
    },
    /// The answer held no text part.
    #[error("model `{model}` returned no text")]
    EmptyAnswer {
        /// Model that was asked.
        model: String,
    },
}

/// Thin client of the `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Arc<str>,
    model: Arc<str>,
    base_url: Arc<str>,
}

impl GeminiClient {
    /// Client of `model` at `base_url`, each request capped at 30 s.
    pub fn new(
        api_key: impl Into<Arc<str>>,
        model: impl Into<Arc<str>>,
        base_url: &str,
    ) -> Result<Self, AiError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| AiError::ClientBuilder { source })?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    /// Build a client from `GEMINI_API_KEY` and `GEMINI_MODEL`; `None` without a key.
    pub fn from_env() -> Result<Option<Self>, AiError> {
        let Some(api_key) = env::var(API_KEY_ENV).ok().filter(|key| !key.trim().is_empty())
        else {
            info!("GEMINI_API_KEY not set; AI co-host disabled");
            return Ok(None);
        };
        let model = env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
        Self::new(api_key, model, DEFAULT_BASE_URL).map(Some)
    }

    /// Model answering questions.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the co-host persona `question` and return its trimmed answer.
    pub async fn ask(&self, question: &str) -> Result<String, AiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: co_host_prompt(question),
                }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key.as_ref())
            .json(&body)
            .send()
            .await
            .map_err(|source| AiError::Request {
                model: self.model.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(AiError::Status {
                model: self.model.to_string(),
                status: response.status(),
            });
        }

        let payload: GenerateResponse =
            response.json().await.map_err(|source| AiError::Decode {
                model: self.model.to_string(),
                source,
            })?;

        payload
            .first_text()
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AiError::EmptyAnswer {
                model: self.model.to_string(),
            })
    }
}

fn co_host_prompt(question: &str) -> String {
    format!(
        "You are an AI co-host of a live TV show. Answer briefly, in a friendly tone, \
         with a touch of humour, but stay on point.\n\n\
         Audience question: {question}\n\
         Answer:"
    )
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateResponse {
    fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|part| part.text.as_str())
            .collect();
        Some(text)
    }
}

/// Forward an audience question to the AI co-host.
pub async fn ask(state: &SharedState, question: &str) -> Result<AskResponse, ServiceError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(ServiceError::InvalidInput("Missing question".into()));
    }

    let client = state
        .ai()
        .ok_or_else(|| ServiceError::Upstream("AI co-host is not configured".into()))?;

    match client.ask(question).await {
        Ok(response) => Ok(AskResponse { response }),
        Err(err) => {
            warn!(model = client.model(), error = %err, "AI co-host request failed");
            Err(ServiceError::Upstream(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;

    #[test]
    fn prompt_embeds_the_question() {
        let prompt = co_host_prompt("Who is the culprit?");
        assert!(prompt.contains("co-host"));
        assert!(prompt.ends_with("Audience question: Who is the culprit?\nAnswer:"));
    }

    #[test]
    fn answer_text_joins_parts_of_first_candidate() {
        let payload: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "  The butler"}, {"text": ", obviously. "}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(payload.first_text().unwrap(), "  The butler, obviously. ");
    }

    #[test]
    fn answer_without_candidates_has_no_text() {
        let payload: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(payload.first_text().is_none());
    }

    #[tokio::test]
    async fn empty_question_is_rejected() {
        let (state, _dir) = test_state(None).await;

        let err = ask(&state, "   ").await.unwrap_err();

        assert!(matches!(err, ServiceError::InvalidInput(message) if message == "Missing question"));
    }

    #[tokio::test]
    async fn unconfigured_client_is_an_upstream_error() {
        let (state, _dir) = test_state(None).await;

        let err = ask(&state, "Who did it?").await.unwrap_err();

        assert!(matches!(err, ServiceError::Upstream(_)));
    }
}
