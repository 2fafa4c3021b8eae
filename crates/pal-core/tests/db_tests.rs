mod common;

use jiff::Timestamp;
use pal_core::{
    learning::{Effectiveness, Learning, LearningRecorder, RecordOutcome},
    Database, PlanController, SessionState,
};
use tempfile::NamedTempFile;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    common::init_logging();
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn create_test_learning(title: &str, applies_to: &str) -> Learning {
    Learning {
        title: title.to_string(),
        learning: format!("Insight behind {title}"),
        applies_to: applies_to.to_string(),
        effectiveness: Effectiveness::Medium,
        source_objective: "Analyze X".to_string(),
        source_steps: 2,
        created_at: Timestamp::now(),
    }
}

#[test]
fn test_database_initialization() {
    let (temp_file, db) = create_test_db();

    assert!(temp_file.path().exists());
    assert_eq!(db.schema_version().expect("Failed to read version"), 1);

    // Reopening an initialized file is harmless
    let reopened = Database::new(temp_file.path()).expect("Failed to reopen database");
    assert_eq!(reopened.schema_version().unwrap(), 1);
}

#[test]
fn test_load_missing_session() {
    let (_temp_file, db) = create_test_db();

    let state = db.load_session("nobody").expect("Failed to load session");
    assert!(state.is_none());
}

#[test]
fn test_session_round_trip() {
    let (_temp_file, db) = create_test_db();
    let controller = PlanController::default();

    let mut state = SessionState::new("round-trip");
    controller
        .create_plan(&mut state, &common::analyze_plan())
        .expect("Failed to create plan");

    db.save_session(&state).expect("Failed to save session");
    let loaded = db
        .load_session("round-trip")
        .expect("Failed to load session")
        .expect("Session should exist");

    assert_eq!(loaded, state);
}

#[test]
fn test_save_session_overwrites() {
    let (_temp_file, db) = create_test_db();
    let controller = PlanController::default();

    let mut state = SessionState::new("overwrite");
    controller
        .create_plan(&mut state, &common::analyze_plan())
        .unwrap();
    db.save_session(&state).unwrap();

    state.plan = None;
    db.save_session(&state).unwrap();

    let loaded = db.load_session("overwrite").unwrap().unwrap();
    assert!(loaded.plan.is_none());
    assert_eq!(db.list_sessions().unwrap(), vec!["overwrite".to_string()]);
}

#[test]
fn test_delete_session() {
    let (_temp_file, db) = create_test_db();

    db.save_session(&SessionState::new("gone")).unwrap();
    assert!(db.delete_session("gone").expect("Failed to delete session"));
    assert!(!db.delete_session("gone").unwrap());
    assert!(db.load_session("gone").unwrap().is_none());
}

#[test]
fn test_record_learning_is_idempotent() {
    let (_temp_file, db) = create_test_db();

    let learning = create_test_learning("Primary sources first", "research");
    assert_eq!(db.record(&learning).unwrap(), RecordOutcome::Saved);

    let mut duplicate = learning.clone();
    duplicate.learning = "Different text, same title".to_string();
    assert_eq!(db.record(&duplicate).unwrap(), RecordOutcome::AlreadyExists);

    let stored = db
        .get_learning("Primary sources first")
        .expect("Failed to get learning")
        .expect("Learning should exist");
    assert_eq!(stored.learning, learning.learning);
    assert_eq!(stored.created_at, learning.created_at);
}

#[test]
fn test_list_learnings_filter() {
    let (_temp_file, db) = create_test_db();

    db.record(&create_test_learning("A", "pricing research")).unwrap();
    db.record(&create_test_learning("B", "deployment")).unwrap();
    db.record(&create_test_learning("C", "market research")).unwrap();

    assert_eq!(db.list_learnings(None).unwrap().len(), 3);

    let titles: Vec<String> = db
        .list_learnings(Some("research"))
        .unwrap()
        .into_iter()
        .map(|l| l.title)
        .collect();
    assert_eq!(titles, vec!["C".to_string(), "A".to_string()]);

    assert!(db.get_learning("missing").unwrap().is_none());
}

#[test]
fn test_list_learnings_newest_first_within_one_second() {
    let (_temp_file, db) = create_test_db();
    let second = Timestamp::from_second(1735689600).unwrap(); // 2025-01-01 00:00:00 UTC

    let mut half = create_test_learning("half", "research");
    half.created_at = Timestamp::new(1735689600, 500_000_000).unwrap();
    let mut whole = create_test_learning("whole", "research");
    whole.created_at = second;
    let mut twelve = create_test_learning("twelve", "research");
    twelve.created_at = Timestamp::new(1735689600, 120_000_000).unwrap();
    let mut tenth = create_test_learning("tenth", "research");
    tenth.created_at = Timestamp::new(1735689600, 100_000_000).unwrap();

    // Recorded out of time order, with fractions of differing length
    for learning in [&half, &whole, &twelve, &tenth] {
        db.record(learning).unwrap();
    }

    let titles: Vec<String> = db
        .list_learnings(None)
        .unwrap()
        .into_iter()
        .map(|l| l.title)
        .collect();
    assert_eq!(titles, vec!["half", "twelve", "tenth", "whole"]);

    let stored = db.get_learning("whole").unwrap().unwrap();
    assert_eq!(stored.created_at, second);
}

#[test]
fn test_in_memory_database() {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    db.save_session(&SessionState::new("mem")).unwrap();
    assert!(db.load_session("mem").unwrap().is_some());
}
