//! Session-scoped hosting of the plan controller.
//!
//! A [`SessionHost`] keeps one plan store per session id in SQLite. Calls for
//! the same session are serialized by a per-session lock; calls for different
//! sessions run independently and never observe each other's store.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  execute(id, op)│    │ session lock +  │    │    Database     │
//! │  save_learning  │───▶│ PlanController  │───▶│ (session_state, │
//! │                 │    │ (spawn_blocking)│    │  learnings)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pal_core::{driver::Operation, host::HostBuilder, models::PlanStatus};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let host = HostBuilder::new().with_database_path("pal.db").build().await?;
//!
//! let response = host.execute("session-1", Operation::GetStatus).await?;
//! assert_eq!(response.unwrap().snapshot.status(), PlanStatus::NoPlan);
//! # Ok(())
//! # }
//! ```

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex as StdMutex, MutexGuard},
};

use log::debug;
use tokio::{sync::Mutex, task};

pub mod builder;

pub use builder::HostBuilder;

use crate::{
    controller::{PlanController, Response},
    db::Database,
    driver::{Operation, PlanTools, Session},
    error::{PlannerError, Result},
    learning::{Approval, Learning},
    models::SessionState,
    params::SaveLearning,
};

/// Hosts plan stores for many concurrent sessions.
pub struct SessionHost {
    db_path: PathBuf,
    controller: PlanController,
    sessions: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl SessionHost {
    pub(crate) fn new(db_path: PathBuf, controller: PlanController) -> Self {
        Self {
            db_path,
            controller,
            sessions: StdMutex::new(HashMap::new()),
        }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs one operation against a session's plan store.
    ///
    /// The outer `Result` reports storage failures; the inner [`Response`] is
    /// the controller's answer. `save_learning` through this path always
    /// lacks approval; use [`SessionHost::save_learning`] once approved.
    pub async fn execute(&self, session_id: &str, operation: Operation) -> Result<Response> {
        self.run(session_id, operation, Approval::Denied).await
    }

    /// Captures an approved learning from the session's completed plan.
    pub async fn save_learning(
        &self,
        session_id: &str,
        params: SaveLearning,
        approval: Approval,
    ) -> Result<Response> {
        self.run(session_id, Operation::SaveLearning(params), approval)
            .await
    }

    /// Loads a session's plan store without applying any operation.
    pub async fn load(&self, session_id: &str) -> Result<SessionState> {
        let session_id = validate_session_id(session_id)?;
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let state = db
                .load_session(&session_id)?
                .unwrap_or_else(|| SessionState::new(session_id));
            Ok::<_, PlannerError>(state)
        })
        .await?
    }

    /// Drops a session's stored plan and its lock. Returns whether anything
    /// was stored.
    pub async fn end_session(&self, session_id: &str) -> Result<bool> {
        let session_id = validate_session_id(session_id)?;
        let lock = self.session_lock(&session_id)?;
        let _guard = lock.lock().await;
        let db_path = self.db_path.clone();
        let key = session_id.clone();

        let deleted =
            task::spawn_blocking(move || Database::new(&db_path)?.delete_session(&session_id))
                .await??;
        self.release_session_lock(&key, &lock)?;
        Ok(deleted)
    }

    /// Lists saved learnings, optionally filtered by `applies_to`.
    pub async fn learnings(&self, applies_to: Option<&str>) -> Result<Vec<Learning>> {
        let db_path = self.db_path.clone();
        let filter = applies_to.map(String::from);

        task::spawn_blocking(move || Database::new(&db_path)?.list_learnings(filter.as_deref()))
            .await?
    }

    async fn run(
        &self,
        session_id: &str,
        operation: Operation,
        approval: Approval,
    ) -> Result<Response> {
        let session_id = validate_session_id(session_id)?;
        let lock = self.session_lock(&session_id)?;
        let _guard = lock.lock().await;

        let db_path = self.db_path.clone();
        let controller = self.controller.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let mut state = db
                .load_session(&session_id)?
                .unwrap_or_else(|| SessionState::new(session_id.clone()));
            let before = operation.is_mutation().then(|| state.clone());

            debug!("Session '{session_id}': {}", operation.name());
            let response = Session::new(&controller, &mut state)
                .with_recorder(&db, approval)
                .apply(&operation);

            if before.map_or(false, |before| before != state) {
                db.save_session(&state)?;
            }
            Ok::<_, PlannerError>(response)
        })
        .await?
    }

    fn session_lock(&self, session_id: &str) -> Result<Arc<Mutex<()>>> {
        Ok(self
            .registry()?
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    /// Forgets a session's lock unless another call is already waiting on it.
    ///
    /// Clones are only taken under the registry lock, so a count of two
    /// (the map and `lock`) means nobody else holds it.
    fn release_session_lock(&self, session_id: &str, lock: &Arc<Mutex<()>>) -> Result<()> {
        let mut sessions = self.registry()?;
        if Arc::strong_count(lock) == 2 {
            sessions.remove(session_id);
        }
        Ok(())
    }

    fn registry(&self) -> Result<MutexGuard<'_, HashMap<String, Arc<Mutex<()>>>>> {
        self.sessions
            .lock()
            .map_err(|_| PlannerError::Configuration {
                message: "Session registry lock poisoned".to_string(),
            })
    }

    #[cfg(test)]
    fn tracked_sessions(&self) -> usize {
        self.registry().map_or(0, |sessions| sessions.len())
    }
}

fn validate_session_id(session_id: &str) -> Result<String> {
    let trimmed = session_id.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::invalid_input("session_id").with_reason("must not be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        models::{PlanStatus, StepSpec},
        params::CreatePlan,
    };

    async fn create_host() -> (TempDir, SessionHost) {
        let temp_dir = TempDir::new().unwrap();
        let host = HostBuilder::new()
            .with_database_path(temp_dir.path().join("pal.db"))
            .build()
            .await
            .unwrap();
        (temp_dir, host)
    }

    fn create_op() -> Operation {
        Operation::CreatePlan(CreatePlan {
            objective: "Analyze X".to_string(),
            steps: vec![StepSpec::new("Gather data"), StepSpec::new("Summarize")],
            context: None,
        })
    }

    #[tokio::test]
    async fn test_end_session_releases_lock() {
        let (_temp_dir, host) = create_host().await;

        host.execute("a", create_op()).await.unwrap().unwrap();
        host.execute("b", Operation::GetStatus).await.unwrap().unwrap();
        assert_eq!(host.tracked_sessions(), 2);

        assert!(host.end_session("a").await.unwrap());
        assert_eq!(host.tracked_sessions(), 1);
        assert!(!host.end_session("b").await.unwrap());
        assert_eq!(host.tracked_sessions(), 0);

        // An ended session starts over with a fresh lock
        let status = host.execute("a", Operation::GetStatus).await.unwrap().unwrap();
        assert_eq!(status.snapshot.status(), PlanStatus::NoPlan);
        assert_eq!(host.tracked_sessions(), 1);
    }

    #[tokio::test]
    async fn test_end_session_keeps_lock_with_waiter() {
        let (_temp_dir, host) = create_host().await;
        let waiter = host.session_lock("a").unwrap();

        host.end_session("a").await.unwrap();
        assert_eq!(host.tracked_sessions(), 1);

        drop(waiter);
        host.end_session("a").await.unwrap();
        assert_eq!(host.tracked_sessions(), 0);
    }

    #[tokio::test]
    async fn test_read_only_operation_stores_nothing() {
        let (_temp_dir, host) = create_host().await;

        host.execute("reader", Operation::GetStatus).await.unwrap().unwrap();
        let db = Database::new(host.database_path()).unwrap();
        assert!(db.list_sessions().unwrap().is_empty());

        host.execute("writer", create_op()).await.unwrap().unwrap();
        assert_eq!(db.list_sessions().unwrap(), vec!["writer".to_string()]);
    }
}
