//! Offline lexicon-based sentiment classifier.
//!
//! Counts positive and negative words, flipping the polarity of a word that
//! directly follows a negator ("not good", "never happy", "didn't like").
//! Labels match the binary SST-2 convention of the hosted model so records
//! from either backend read the same.

use async_trait::async_trait;

use crate::classifier::provider::{Sentiment, SentimentClassifier};
use crate::error::ClassifierError;

const POSITIVE: &str = "POSITIVE";
const NEGATIVE: &str = "NEGATIVE";

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "beautiful", "best", "brilliant", "delightful", "enjoy", "enjoyed",
    "excellent", "fantastic", "fast", "glad", "good", "great", "happy", "helpful", "impressive",
    "like", "liked", "love", "loved", "lovely", "nice", "perfect", "pleasant", "recommend",
    "reliable", "satisfied", "smooth", "superb", "wonderful", "works",
];

const NEGATIVE_WORDS: &[&str] = &[
    "angry", "annoying", "awful", "bad", "boring", "broken", "buggy", "disappointed",
    "disappointing", "hate", "hated", "horrible", "poor", "refund", "sad", "slow", "terrible",
    "ugly", "unhappy", "useless", "waste", "worse", "worst", "wrong",
];

const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "hardly"];

/// Deterministic word-list classifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Score text synchronously. Never fails.
    pub fn score(&self, text: &str) -> Sentiment {
        let mut positive = 0u32;
        let mut negative = 0u32;
        let mut negate_next = false;

        for raw in text.split(|c: char| !(c.is_alphanumeric() || c == '\'')) {
            if raw.is_empty() {
                continue;
            }
            let word = raw.to_lowercase();
            let word = word.trim_matches('\'');

            if NEGATORS.contains(&word) || word.ends_with("n't") {
                negate_next = true;
                continue;
            }

            let polarity = if POSITIVE_WORDS.contains(&word) {
                Some(true)
            } else if NEGATIVE_WORDS.contains(&word) {
                Some(false)
            } else {
                None
            };

            if let Some(is_positive) = polarity {
                if is_positive != negate_next {
                    positive += 1;
                } else {
                    negative += 1;
                }
                negate_next = false;
            }
        }

        let total = positive + negative;
        if total == 0 || positive == negative {
            return Sentiment::new(POSITIVE, 0.5);
        }

        let margin = f64::from(positive.abs_diff(negative)) / f64::from(total);
        let score = 0.5 + 0.5 * margin;
        let label = if positive > negative { POSITIVE } else { NEGATIVE };
        Sentiment::new(label, score)
    }
}

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    fn name(&self) -> &str {
        "lexicon"
    }

    async fn classify(&self, text: &str) -> Result<Sentiment, ClassifierError> {
        Ok(self.score(text))
    }
}
