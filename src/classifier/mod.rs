//! Sentiment classification backends.
//!
//! Supports:
//! - **HuggingFace**: hosted text-classification inference over HTTP
//! - **Lexicon**: built-in word list, works offline

mod huggingface;
mod lexicon;
mod provider;

pub use huggingface::HuggingFaceClassifier;
pub use lexicon::LexiconClassifier;
pub use provider::{Sentiment, SentimentClassifier};

use std::sync::Arc;

use crate::config::{ClassifierBackend, ClassifierConfig};
use crate::error::ClassifierError;

/// Create a classifier based on configuration.
pub fn create_classifier(
    config: &ClassifierConfig,
) -> Result<Arc<dyn SentimentClassifier>, ClassifierError> {
    match config.backend {
        ClassifierBackend::HuggingFace => {
            tracing::info!(model = %config.model, base_url = %config.base_url, "Using hosted sentiment model");
            Ok(Arc::new(HuggingFaceClassifier::new(config.clone())?))
        }
        ClassifierBackend::Lexicon => {
            tracing::info!("Using built-in lexicon sentiment classifier");
            Ok(Arc::new(LexiconClassifier::new()))
        }
    }
}
