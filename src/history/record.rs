use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::Sentiment;

/// One analyzed text and the classifier's verdict on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub id: Uuid,
    /// The input exactly as submitted. Never trimmed.
    pub text: String,
    pub result: Sentiment,
    pub timestamp: DateTime<Utc>,
}

impl SentimentRecord {
    /// Build a record stamped with the current time.
    ///
    /// The timestamp is truncated to microseconds, the precision the store keeps.
    pub fn new(text: impl Into<String>, result: Sentiment) -> Self {
        Self::at(text, result, Utc::now().trunc_subsecs(6))
    }

    /// Build a record with an explicit timestamp.
    pub fn at(text: impl Into<String>, result: Sentiment, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            result,
            timestamp,
        }
    }
}
