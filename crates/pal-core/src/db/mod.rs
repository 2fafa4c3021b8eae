//! SQLite persistence for session plan stores and saved learnings.
//!
//! Each session's [`SessionState`](crate::models::SessionState) is stored as a
//! single JSON document keyed by session id, so a store is always written and
//! read as a whole. Learnings live in their own table, unique by title.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod learning_queries;
pub mod migrations;
pub mod session_queries;

/// How long a connection waits on a lock held by another session's write.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
