//! Sentiment classifier trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClassifierError;

/// Label/score pair produced by a classifier for one piece of text.
///
/// `score` is the model's confidence in `label`, in `[0, 1]`. It is kept at
/// full precision; rounding only happens when rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: String,
    pub score: f64,
}

impl Sentiment {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Score as a percentage rounded to two decimals, e.g. `"99.87"`.
    pub fn percent(&self) -> String {
        format!("{:.2}", self.score * 100.0)
    }
}

/// A text sentiment classifier.
///
/// Implementations are built once at startup and shared across requests, so
/// they must not hold per-request state.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Backend name, used in logs and errors.
    fn name(&self) -> &str;

    /// Classify `text`, returning exactly one label/score pair.
    ///
    /// Callers are expected to reject blank input before calling this.
    async fn classify(&self, text: &str) -> Result<Sentiment, ClassifierError>;
}
