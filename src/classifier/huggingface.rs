//! Hosted text-classification classifier.
//!
//! Talks to any endpoint that implements the Hugging Face inference
//! `text-classification` task: `POST {base_url}/models/{model}` with
//! `{"inputs": "..."}`, answered by a list of `{label, score}` candidates.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::classifier::provider::{Sentiment, SentimentClassifier};
use crate::config::ClassifierConfig;
use crate::error::ClassifierError;

const BACKEND_NAME: &str = "huggingface";

/// Classifier backed by a hosted inference API.
pub struct HuggingFaceClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl HuggingFaceClassifier {
    /// Create a new classifier. The HTTP client is built once and reused.
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifierError::RequestFailed {
                backend: BACKEND_NAME.to_string(),
                reason: format!("Failed to build reqwest client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    /// Inference URL for the configured model.
    fn model_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{}/models/{}", base, self.config.model.trim_start_matches('/'))
    }

    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_token() {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// One candidate label in an inference response.
#[derive(Debug, Deserialize)]
struct Candidate {
    label: String,
    score: f64,
}

/// Hosts answer with either one list per input or a flat list for a single input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batched(Vec<Vec<Candidate>>),
    Flat(Vec<Candidate>),
}

/// Pick the highest-scoring candidate from a raw response body.
fn parse_response(body: &str) -> Result<Sentiment, ClassifierError> {
    let parsed: InferenceResponse =
        serde_json::from_str(body).map_err(|e| ClassifierError::InvalidResponse {
            backend: BACKEND_NAME.to_string(),
            reason: format!(
                "JSON parse error: {}. Raw: {}",
                e,
                truncate(body, 200)
            ),
        })?;

    let candidates = match parsed {
        InferenceResponse::Batched(batches) => batches.into_iter().next().unwrap_or_default(),
        InferenceResponse::Flat(list) => list,
    };

    let best = candidates
        .into_iter()
        .filter(|c| c.score.is_finite())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| ClassifierError::InvalidResponse {
            backend: BACKEND_NAME.to_string(),
            reason: "response contained no labels".to_string(),
        })?;

    Ok(Sentiment::new(best.label, best.score.clamp(0.0, 1.0)))
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[async_trait]
impl SentimentClassifier for HuggingFaceClassifier {
    fn name(&self) -> &str {
        BACKEND_NAME
    }

    async fn classify(&self, text: &str) -> Result<Sentiment, ClassifierError> {
        let url = self.model_url();
        tracing::debug!(%url, text_len = text.len(), "Sending classification request");

        let request = self
            .client
            .post(&url)
            .json(&InferenceRequest { inputs: text });
        let request = self.add_auth_header(request);

        let response = request.send().await.map_err(|e| {
            tracing::error!("Classification request failed: {}", e);
            ClassifierError::RequestFailed {
                backend: BACKEND_NAME.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::RequestFailed {
                backend: BACKEND_NAME.to_string(),
                reason: format!("Failed to read response body: {}", e),
            })?;

        tracing::debug!(status = status.as_u16(), "Classification response received");

        if !status.is_success() {
            return Err(match status.as_u16() {
                401 | 403 => ClassifierError::AuthFailed {
                    backend: BACKEND_NAME.to_string(),
                },
                429 => ClassifierError::RateLimited {
                    backend: BACKEND_NAME.to_string(),
                },
                503 => ClassifierError::ModelLoading {
                    backend: BACKEND_NAME.to_string(),
                },
                _ => ClassifierError::RequestFailed {
                    backend: BACKEND_NAME.to_string(),
                    reason: format!("HTTP {}: {}", status, truncate(&body, 200)),
                },
            });
        }

        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_batched_response_and_picks_best() {
        let body = r#"[[{"label":"NEGATIVE","score":0.0012},{"label":"POSITIVE","score":0.9988}]]"#;
        let sentiment = parse_response(body).unwrap();
        assert_eq!(sentiment.label, "POSITIVE");
        assert!((sentiment.score - 0.9988).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_flat_response() {
        let body = r#"[{"label":"NEGATIVE","score":0.97},{"label":"POSITIVE","score":0.03}]"#;
        let sentiment = parse_response(body).unwrap();
        assert_eq!(sentiment.label, "NEGATIVE");
    }

    #[test]
    fn empty_candidate_list_is_invalid() {
        let err = parse_response("[[]]").unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidResponse { .. }));
    }

    #[test]
    fn error_object_is_invalid() {
        let err = parse_response(r#"{"error":"Model is overloaded"}"#).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidResponse { .. }));
    }

    #[test]
    fn model_url_joins_without_double_slash() {
        let classifier = HuggingFaceClassifier::new(ClassifierConfig {
            base_url: "http://127.0.0.1:9000/".to_string(),
            model: "acme/sentiment".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            classifier.model_url(),
            "http://127.0.0.1:9000/models/acme/sentiment"
        );
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 200), "hi");
    }
}
