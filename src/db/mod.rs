//! Persistence for sentiment history.
//!
//! [`HistoryStore`] is the boundary the rest of the service talks to; the
//! libSQL backend is the only implementation shipped.

pub mod libsql;
mod libsql_migrations;

use std::sync::Arc;

use async_trait::async_trait;

use self::libsql::LibSqlBackend;
use crate::config::DatabaseConfig;
use crate::error::DatabaseError;
use crate::history::SentimentRecord;

/// Append-only store of sentiment records.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist a record. Records are never updated or deleted.
    async fn append(&self, record: &SentimentRecord) -> Result<(), DatabaseError>;

    /// Up to `limit` records, most recent first.
    ///
    /// Records with the same timestamp come back newest insert first.
    async fn recent(&self, limit: usize) -> Result<Vec<SentimentRecord>, DatabaseError>;

    /// Total number of stored records.
    async fn count(&self) -> Result<u64, DatabaseError>;
}

/// Open the configured history store and apply its schema.
pub async fn connect_from_config(
    config: &DatabaseConfig,
) -> Result<Arc<dyn HistoryStore>, DatabaseError> {
    let backend = match (&config.libsql_url, config.auth_token()) {
        (Some(url), Some(token)) => {
            LibSqlBackend::new_remote_replica(&config.libsql_path, url, token).await?
        }
        _ => LibSqlBackend::new_local(&config.libsql_path).await?,
    };
    backend.run_migrations().await?;

    tracing::info!(path = %config.libsql_path.display(), remote = config.libsql_url.is_some(), "History store ready");
    Ok(Arc::new(backend))
}
