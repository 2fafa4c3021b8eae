//! Session store persistence.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::SessionState,
};

const SELECT_SESSION_SQL: &str = "SELECT state FROM session_state WHERE session_id = ?1";
const UPSERT_SESSION_SQL: &str = "INSERT INTO session_state (session_id, status, state, updated_at) VALUES (?1, ?2, ?3, ?4) \
     ON CONFLICT(session_id) DO UPDATE SET status = excluded.status, state = excluded.state, updated_at = excluded.updated_at";
const DELETE_SESSION_SQL: &str = "DELETE FROM session_state WHERE session_id = ?1";
const LIST_SESSIONS_SQL: &str = "SELECT session_id FROM session_state ORDER BY session_id";

impl super::Database {
    /// Loads a session's plan store, or `None` if the session was never saved.
    pub fn load_session(&self, session_id: &str) -> Result<Option<SessionState>> {
        let json: Option<String> = self
            .connection
            .query_row(SELECT_SESSION_SQL, params![session_id], |row| row.get(0))
            .optional()
            .db_context("Failed to load session state")?;

        let Some(json) = json else {
            return Ok(None);
        };

        let state: SessionState = serde_json::from_str(&json)?;
        if state.session_id != session_id {
            return Err(PlannerError::Configuration {
                message: format!(
                    "Stored state for session '{session_id}' belongs to '{}'",
                    state.session_id
                ),
            });
        }
        Ok(Some(state))
    }

    /// Writes a session's plan store, replacing any previous version.
    pub fn save_session(&self, state: &SessionState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        let now = Timestamp::now().to_string();

        self.connection
            .execute(
                UPSERT_SESSION_SQL,
                params![state.session_id, state.status().as_str(), json, now],
            )
            .db_context("Failed to save session state")?;

        debug!("Saved session '{}' ({})", state.session_id, state.status());
        Ok(())
    }

    /// Deletes a session's stored state. Returns whether a row existed.
    pub fn delete_session(&self, session_id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_SESSION_SQL, params![session_id])
            .db_context("Failed to delete session state")?;
        Ok(deleted > 0)
    }

    /// Ids of every stored session.
    pub fn list_sessions(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(LIST_SESSIONS_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to query sessions")?;

        rows.collect::<rusqlite::Result<Vec<String>>>()
            .db_context("Failed to read session ids")
    }
}
