//! SQLite-dialect schema for the libSQL backend.
//!
//! Applied on every startup; idempotent via `IF NOT EXISTS`.

/// Consolidated schema for libSQL.
///
/// - `created_at` is fixed-width RFC 3339 UTC text with microseconds, so
///   lexical order is chronological order.
/// - `seq` preserves insertion order for records sharing a timestamp.
pub const SCHEMA: &str = r#"

-- ==================== Sentiment history ====================

CREATE TABLE IF NOT EXISTS sentiment_records (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    text TEXT NOT NULL CHECK (length(text) > 0),
    label TEXT NOT NULL,
    score REAL NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_sentiment_records_recent
    ON sentiment_records(created_at DESC, seq DESC);
"#;
