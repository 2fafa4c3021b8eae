//! Builder for creating and configuring SessionHost instances.

use std::path::{Path, PathBuf};

use log::info;
use tokio::task;

use super::SessionHost;
use crate::{
    config::ControllerConfig,
    controller::PlanController,
    db::Database,
    error::{PlannerError, Result},
};

/// Builder for creating and configuring SessionHost instances.
#[derive(Debug, Clone, Default)]
pub struct HostBuilder {
    database_path: Option<PathBuf>,
    config: ControllerConfig,
}

impl HostBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/pal/pal.db` or `~/.local/share/pal/pal.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the controller configuration shared by every session.
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the configured host.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the database directory cannot be
    /// created, `PlannerError::XdgDirectory` if no default location exists,
    /// and `PlannerError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<SessionHost> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(drop)).await??;

        info!("Session host ready at {}", db_path.display());
        Ok(SessionHost::new(db_path, PlanController::new(self.config)))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("pal")
            .place_data_file("pal.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}
