// SPDX-FileCopyrightText: 2026 Pixtrace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use tracing::info;

use pixtrace_core::error::PixtraceError;
use pixtrace_config::model::StorageConfig;

use crate::migrations;

/// Handle to the SQLite database.
///
/// Cheap to clone; every clone shares the same background connection.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Opens (creating if needed) the database at the configured path,
    /// applies PRAGMAs, and runs pending migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, PixtraceError> {
        if let Some(parent) = Path::new(&config.database_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PixtraceError::Storage {
                    source: Box::new(e),
                })?;
            }
        }
        let conn = tokio_rusqlite::Connection::open(&config.database_path)
            .await
            .map_err(|e| map_tr_err(tokio_rusqlite::Error::Error(e)))?;
        let db = Self { conn };
        db.initialize(config.wal_mode).await?;
        info!(path = %config.database_path, wal = config.wal_mode, "database opened");
        Ok(db)
    }

    /// Opens an in-memory database. Used for tests.
    pub async fn open_in_memory() -> Result<Self, PixtraceError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| map_tr_err(tokio_rusqlite::Error::Error(e)))?;
        let db = Self { conn };
        db.initialize(false).await?;
        Ok(db)
    }

    async fn initialize(&self, wal_mode: bool) -> Result<(), PixtraceError> {
        self.conn
            .call(move |conn| {
                if wal_mode {
                    conn.pragma_update(None, "journal_mode", "WAL")
                        .map_err(map_sql_err)?;
                }
                conn.pragma_update(None, "synchronous", "NORMAL")
                    .map_err(map_sql_err)?;
                conn.pragma_update(None, "foreign_keys", "ON")
                    .map_err(map_sql_err)?;
                conn.busy_timeout(std::time::Duration::from_secs(5))
                    .map_err(map_sql_err)?;
                migrations::run_migrations(conn)?;
                Ok(())
            })
            .await
            .map_err(map_tr_err::<PixtraceError>)
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }
}

fn map_sql_err(err: rusqlite::Error) -> PixtraceError {
    PixtraceError::Storage {
        source: Box::new(err),
    }
}

/// Maps a tokio-rusqlite error into the workspace error type.
pub fn map_tr_err<E>(err: tokio_rusqlite::Error<E>) -> PixtraceError
where
    E: std::error::Error + Send + Sync + 'static,
{
    PixtraceError::Storage {
        source: Box::new(err),
    }
}
