//! Analyze-and-record workflow shared by the HTTP handlers and the CLI.

use std::sync::Arc;

use crate::classifier::{Sentiment, SentimentClassifier};
use crate::db::HistoryStore;
use crate::error::{ClassifierError, DatabaseError};
use crate::history::SentimentRecord;

/// Validation message for the HTML form endpoint.
pub const EMPTY_TEXT: &str = "Empty text";
/// Validation message for the JSON API endpoint.
pub const TEXT_REQUIRED: &str = "Text is required";

/// Failure of an analyze or history request.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// Input was empty or whitespace only. Carries the message shown to the caller.
    #[error("{0}")]
    EmptyText(&'static str),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

/// Reject input that is empty or consists solely of whitespace.
///
/// The text itself is returned untouched; trimming is only used for the check.
pub fn validate_text<'a>(text: &'a str, message: &'static str) -> Result<&'a str, AnalyzeError> {
    if text.trim().is_empty() {
        return Err(AnalyzeError::EmptyText(message));
    }
    Ok(text)
}

/// Classifies text, records the verdict, and reads back recent history.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct Analyzer {
    classifier: Arc<dyn SentimentClassifier>,
    store: Arc<dyn HistoryStore>,
    history_limit: usize,
}

impl Analyzer {
    pub fn new(
        classifier: Arc<dyn SentimentClassifier>,
        store: Arc<dyn HistoryStore>,
        history_limit: usize,
    ) -> Self {
        Self {
            classifier,
            store,
            history_limit,
        }
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Classify already-validated text and persist the result.
    ///
    /// If the append fails the classification is lost and the error surfaces.
    pub async fn analyze(&self, text: &str) -> Result<Sentiment, AnalyzeError> {
        let sentiment = self.classifier.classify(text).await.map_err(|e| {
            tracing::error!(backend = self.classifier.name(), error = %e, "Classification failed");
            e
        })?;

        let record = SentimentRecord::new(text, sentiment.clone());
        self.store.append(&record).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to store sentiment record");
            e
        })?;

        tracing::info!(
            id = %record.id,
            label = %sentiment.label,
            score = sentiment.score,
            text_len = text.len(),
            "Recorded sentiment"
        );
        Ok(sentiment)
    }

    /// The configured number of most recent records, newest first.
    pub async fn recent(&self) -> Result<Vec<SentimentRecord>, AnalyzeError> {
        self.recent_with_limit(self.history_limit).await
    }

    pub async fn recent_with_limit(
        &self,
        limit: usize,
    ) -> Result<Vec<SentimentRecord>, AnalyzeError> {
        Ok(self.store.recent(limit).await?)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::classifier::LexiconClassifier;
    use crate::db::libsql::LibSqlBackend;

    struct FailingClassifier;

    #[async_trait]
    impl SentimentClassifier for FailingClassifier {
        fn name(&self) -> &str {
            "failing"
        }

        async fn classify(&self, _text: &str) -> Result<Sentiment, ClassifierError> {
            Err(ClassifierError::ModelLoading {
                backend: "failing".to_string(),
            })
        }
    }

    async fn memory_store() -> Arc<dyn HistoryStore> {
        let backend = LibSqlBackend::new_memory().await.unwrap();
        backend.run_migrations().await.unwrap();
        Arc::new(backend)
    }

    #[test]
    fn validate_rejects_blank_input() {
        for input in ["", " ", "\t\n", "\u{3000}"] {
            assert!(matches!(
                validate_text(input, EMPTY_TEXT),
                Err(AnalyzeError::EmptyText(EMPTY_TEXT))
            ));
        }
    }

    #[test]
    fn validate_returns_text_untrimmed() {
        assert_eq!(validate_text("  hi  ", TEXT_REQUIRED).unwrap(), "  hi  ");
    }

    #[tokio::test]
    async fn analyze_records_exact_text() {
        let store = memory_store().await;
        let analyzer = Analyzer::new(Arc::new(LexiconClassifier::new()), store.clone(), 10);

        let sentiment = analyzer.analyze("  I love it \n").await.unwrap();
        assert_eq!(sentiment.label, "POSITIVE");

        let history = analyzer.recent().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "  I love it \n");
        assert_eq!(history[0].result, sentiment);
    }

    #[tokio::test]
    async fn classifier_failure_stores_nothing() {
        let store = memory_store().await;
        let analyzer = Analyzer::new(Arc::new(FailingClassifier), store.clone(), 10);

        let err = analyzer.analyze("anything").await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Classifier(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn recent_respects_history_limit() {
        let store = memory_store().await;
        let analyzer = Analyzer::new(Arc::new(LexiconClassifier::new()), store, 3);
        for i in 0..5 {
            analyzer.analyze(&format!("good {i}")).await.unwrap();
        }
        let history = analyzer.recent().await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].text, "good 4");
    }
}
