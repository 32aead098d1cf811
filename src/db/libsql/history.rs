//! HistoryStore implementation for LibSqlBackend.

use async_trait::async_trait;
use libsql::params;
use uuid::Uuid;

use super::{LibSqlBackend, fmt_ts, parse_ts};
use crate::classifier::Sentiment;
use crate::db::HistoryStore;
use crate::error::DatabaseError;
use crate::history::SentimentRecord;

/// Convert a libsql Row to a SentimentRecord.
///
/// Column order: id(0), text(1), label(2), score(3), created_at(4).
fn row_to_record(row: &libsql::Row) -> Result<SentimentRecord, DatabaseError> {
    let id_str: String = row.get(0)?;
    let id: Uuid = id_str
        .parse()
        .map_err(|e| DatabaseError::Serialization(format!("invalid record id: {e}")))?;
    let text: String = row.get(1)?;
    let label: String = row.get(2)?;
    let score: f64 = row.get(3)?;
    let created_at: String = row.get(4)?;

    Ok(SentimentRecord {
        id,
        text,
        result: Sentiment { label, score },
        timestamp: parse_ts(&created_at)?,
    })
}

#[async_trait]
impl HistoryStore for LibSqlBackend {
    async fn append(&self, record: &SentimentRecord) -> Result<(), DatabaseError> {
        let conn = self.connect().await?;
        conn.execute(
            "INSERT INTO sentiment_records (id, text, label, score, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.id.to_string(),
                record.text.as_str(),
                record.result.label.as_str(),
                record.result.score,
                fmt_ts(&record.timestamp),
            ],
        )
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<SentimentRecord>, DatabaseError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let conn = self.connect().await?;
        let mut rows = conn
            .query(
                "SELECT id, text, label, score, created_at FROM sentiment_records \
                 ORDER BY created_at DESC, seq DESC LIMIT ?1",
                params![limit],
            )
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            records.push(row_to_record(&row)?);
        }
        Ok(records)
    }

    async fn count(&self) -> Result<u64, DatabaseError> {
        let conn = self.connect().await?;
        let mut rows = conn
            .query("SELECT COUNT(*) FROM sentiment_records", ())
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let count: i64 = match rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?
        {
            Some(row) => row.get(0)?,
            None => 0,
        };
        Ok(u64::try_from(count).unwrap_or_default())
    }
}
