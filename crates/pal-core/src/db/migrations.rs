//! Database schema initialization.

use crate::error::{DatabaseResultExt, Result};

/// Bumped whenever `assets/schema.sql` changes shape.
const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        let version: i64 = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")?;

        if version < SCHEMA_VERSION {
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .db_context("Failed to record schema version")?;
        }

        Ok(())
    }

    /// Schema version recorded in the database file.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }
}
