#![allow(dead_code)]

use pal_core::{
    models::StepSpec, params::CreatePlan, HostBuilder, SessionHost,
};
use tempfile::TempDir;

/// Routes library logs through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Helper function to create a test host
pub async fn create_test_host() -> (TempDir, SessionHost) {
    init_logging();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let host = HostBuilder::new()
        .with_database_path(&db_path)
        .build()
        .await
        .expect("Failed to create host");
    (temp_dir, host)
}

/// The two-step plan used across integration tests
pub fn analyze_plan() -> CreatePlan {
    CreatePlan {
        objective: "Analyze X".to_string(),
        steps: vec![
            StepSpec::new("Gather data").with_criteria("3 sources found"),
            StepSpec::new("Summarize").with_criteria("<200 words"),
        ],
        context: Some("Quarterly review".to_string()),
    }
}
