//! SQLite database handle and schema bootstrap.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use crate::storage::training_store::TrainingStore;

/// Owns the SQLite connection shared by the stores.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database file. Missing parent directories are
    /// created.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        Self::bootstrap(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
        Self::bootstrap(conn)
    }

    /// Create the tables on a fresh file and stamp the version. A file
    /// already at the current version is left untouched.
    fn bootstrap(conn: Connection) -> Result<Self, DatabaseError> {
        let db = Self { conn };
        db.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        match db.schema_version()? {
            0 => db.create_schema()?,
            CURRENT_VERSION => {}
            newer => return Err(DatabaseError::UnsupportedVersion(newer)),
        }
        Ok(db)
    }

    fn create_schema(&self) -> Result<(), DatabaseError> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tx.execute_batch(SCHEMA)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        tx.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
            [CURRENT_VERSION],
        )
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!("Created training schema v{}", CURRENT_VERSION);
        Ok(())
    }

    /// Highest recorded schema version, 0 for an empty file.
    pub fn schema_version(&self) -> Result<i32, DatabaseError> {
        self.conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get::<_, Option<i32>>(0)
            })
            .optional()
            .map(|version| version.flatten().unwrap_or(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Repository over this database.
    pub fn training_store(&self) -> TrainingStore<'_> {
        TrainingStore::new(&self.conn)
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Database schema v{0} is newer than this build supports")]
    UnsupportedVersion(i32),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}
