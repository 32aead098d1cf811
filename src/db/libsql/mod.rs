//! libSQL/Turso backend for the history store.

mod history;

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{Connection, Database};

use crate::db::libsql_migrations::SCHEMA;
use crate::error::DatabaseError;

/// libSQL database handle.
///
/// File-backed databases open a fresh connection per operation. In-memory
/// databases keep a single shared connection, since each new connection to
/// `:memory:` would see an empty database.
pub struct LibSqlBackend {
    db: Arc<Database>,
    shared_conn: Option<Connection>,
}

impl LibSqlBackend {
    /// Open (or create) a local database file.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::Pool(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {}", e)))?;

        Ok(Self {
            db: Arc::new(db),
            shared_conn: None,
        })
    }

    /// Open an in-memory database (tests and throwaway runs).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open in-memory database: {}", e)))?;
        let conn = db.connect()?;

        Ok(Self {
            db: Arc::new(db),
            shared_conn: Some(conn),
        })
    }

    /// Open a local replica that syncs with a remote Turso database.
    pub async fn new_remote_replica(
        path: &Path,
        url: &str,
        auth_token: &str,
    ) -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_remote_replica(path, url.to_string(), auth_token.to_string())
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open remote replica: {}", e)))?;
        db.sync()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Initial replica sync failed: {}", e)))?;

        Ok(Self {
            db: Arc::new(db),
            shared_conn: None,
        })
    }

    /// Get a connection to the database.
    pub async fn connect(&self) -> Result<Connection, DatabaseError> {
        if let Some(conn) = &self.shared_conn {
            return Ok(conn.clone());
        }
        let conn = self.db.connect()?;
        // Concurrent writers wait for the lock instead of failing immediately.
        conn.query("PRAGMA busy_timeout = 5000", ())
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to set busy_timeout: {}", e)))?;
        Ok(conn)
    }

    /// Apply the schema. Safe to call on every startup.
    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        let conn = self.connect().await?;
        conn.execute_batch(SCHEMA)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        Ok(())
    }
}

/// Format a timestamp as fixed-width RFC 3339 UTC text.
pub(crate) fn fmt_ts(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp written by [`fmt_ts`].
pub(crate) fn parse_ts(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Serialization(format!("invalid timestamp '{}': {}", s, e)))
}
