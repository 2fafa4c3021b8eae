//! Controller configuration.

use serde::{Deserialize, Serialize};

/// Criterion applied to steps created without one.
pub const DEFAULT_SUCCESS_CRITERIA: &str = "Task completed successfully";

/// Tunables for the plan controller and its status rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ControllerConfig {
    /// Success criterion used when a step omits one
    pub default_success_criteria: String,

    /// Maximum characters of completed-step output shown on the status board
    pub preview_chars: usize,

    /// Number of cells in the status board progress bar
    pub progress_width: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_success_criteria: DEFAULT_SUCCESS_CRITERIA.to_string(),
            preview_chars: 80,
            progress_width: 20,
        }
    }
}

impl ControllerConfig {
    pub fn with_default_success_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.default_success_criteria = criteria.into();
        self
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    /// A zero width is bumped to one cell.
    pub fn with_progress_width(mut self, width: usize) -> Self {
        self.progress_width = width.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ControllerConfig::default();
        assert_eq!(config.default_success_criteria, DEFAULT_SUCCESS_CRITERIA);
        assert_eq!(config.preview_chars, 80);
        assert_eq!(config.progress_width, 20);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: ControllerConfig = serde_json::from_str(r#"{"preview_chars": 40}"#).unwrap();
        assert_eq!(config.preview_chars, 40);
        assert_eq!(config.progress_width, 20);
    }

    #[test]
    fn test_progress_width_never_zero() {
        let config = ControllerConfig::default().with_progress_width(0);
        assert_eq!(config.progress_width, 1);
    }
}
