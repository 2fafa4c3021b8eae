//! Learning persistence.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result},
    learning::{Effectiveness, Learning, LearningRecorder, RecordOutcome},
};

const INSERT_LEARNING_SQL: &str = "INSERT OR IGNORE INTO learnings (title, learning, applies_to, effectiveness, source_objective, source_steps, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const LEARNING_COLUMNS: &str =
    "title, learning, applies_to, effectiveness, source_objective, source_steps, created_at";

/// Fixed nanosecond precision, so `created_at` text sorts in time order.
fn sortable_timestamp(timestamp: &Timestamp) -> String {
    format!("{timestamp:.9}")
}

impl super::Database {
    /// Helper function to construct a Learning from a database row
    fn build_learning_from_row(row: &rusqlite::Row) -> rusqlite::Result<Learning> {
        let effectiveness = row
            .get::<_, String>(3)?
            .parse::<Effectiveness>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into()))?;

        Ok(Learning {
            title: row.get(0)?,
            learning: row.get(1)?,
            applies_to: row.get(2)?,
            effectiveness,
            source_objective: row.get(4)?,
            source_steps: row.get::<_, i64>(5)? as usize,
            created_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
        })
    }

    /// Retrieves a learning by its title.
    pub fn get_learning(&self, title: &str) -> Result<Option<Learning>> {
        let sql = format!("SELECT {LEARNING_COLUMNS} FROM learnings WHERE title = ?1");
        self.connection
            .query_row(&sql, params![title], Self::build_learning_from_row)
            .optional()
            .db_context("Failed to load learning")
    }

    /// Lists learnings, newest first, optionally limited to those whose
    /// `applies_to` mentions `applies_to`.
    pub fn list_learnings(&self, applies_to: Option<&str>) -> Result<Vec<Learning>> {
        let mut sql = format!("SELECT {LEARNING_COLUMNS} FROM learnings");
        if applies_to.is_some() {
            sql.push_str(" WHERE applies_to LIKE '%' || ?1 || '%'");
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let rows = match applies_to {
            Some(filter) => stmt.query_map(params![filter], Self::build_learning_from_row),
            None => stmt.query_map([], Self::build_learning_from_row),
        }
        .db_context("Failed to query learnings")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read learnings")
    }
}

impl LearningRecorder for super::Database {
    fn record(&self, learning: &Learning) -> Result<RecordOutcome> {
        let inserted = self
            .connection
            .execute(
                INSERT_LEARNING_SQL,
                params![
                    learning.title,
                    learning.learning,
                    learning.applies_to,
                    learning.effectiveness.as_str(),
                    learning.source_objective,
                    learning.source_steps as i64,
                    sortable_timestamp(&learning.created_at),
                ],
            )
            .db_context("Failed to insert learning")?;

        Ok(if inserted == 0 {
            RecordOutcome::AlreadyExists
        } else {
            RecordOutcome::Saved
        })
    }
}
