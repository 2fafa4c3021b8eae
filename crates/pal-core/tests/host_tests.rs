mod common;

use common::{analyze_plan, create_test_host};
use pal_core::{
    driver::Operation,
    error::{PlannerError, RefusalKind},
    learning::{Approval, Effectiveness, RecordOutcome},
    params::{CompleteStep, ResetPlan, SaveLearning, UpdatePlan},
    render, HostBuilder, PlanEvent, PlanStatus,
};

fn complete(output: &str) -> Operation {
    Operation::CompleteStep(CompleteStep {
        output: output.to_string(),
    })
}

fn proposal() -> SaveLearning {
    SaveLearning {
        title: "Primary sources first".to_string(),
        learning: "Vendor docs were more current than blog posts".to_string(),
        applies_to: "research".to_string(),
        effectiveness: Effectiveness::High,
    }
}

#[tokio::test]
async fn test_state_persists_between_calls() {
    let (_temp_dir, host) = create_test_host().await;

    host.execute("s1", Operation::CreatePlan(analyze_plan()))
        .await
        .expect("Failed to execute")
        .expect("Plan should be created");
    host.execute("s1", complete("Found 3 sources: A, B, C"))
        .await
        .unwrap()
        .unwrap();

    let state = host.load("s1").await.expect("Failed to load session");
    let plan = state.plan().expect("Plan should be stored");
    assert_eq!(plan.current_step, 2);
    assert_eq!(plan.context.as_deref(), Some("Quarterly review"));
}

#[tokio::test]
async fn test_state_survives_host_restart() {
    let (temp_dir, host) = create_test_host().await;
    host.execute("restart", Operation::CreatePlan(analyze_plan()))
        .await
        .unwrap()
        .unwrap();
    drop(host);

    let host = HostBuilder::new()
        .with_database_path(temp_dir.path().join("test.db"))
        .build()
        .await
        .expect("Failed to rebuild host");
    let response = host.execute("restart", Operation::GetStatus).await.unwrap();
    let outcome = response.unwrap();
    assert_eq!(outcome.snapshot.status(), PlanStatus::InProgress);
    assert!(render(&Ok(outcome)).contains("🎯 OBJECTIVE: Analyze X"));
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let (_temp_dir, host) = create_test_host().await;

    host.execute("alpha", Operation::CreatePlan(analyze_plan()))
        .await
        .unwrap()
        .unwrap();

    let beta = host.execute("beta", Operation::GetStatus).await.unwrap().unwrap();
    assert_eq!(beta.snapshot.status(), PlanStatus::NoPlan);

    // beta may create its own plan while alpha's is active
    host.execute("beta", Operation::CreatePlan(analyze_plan()))
        .await
        .unwrap()
        .unwrap();
    host.execute("beta", complete("done")).await.unwrap().unwrap();

    let alpha = host.load("alpha").await.unwrap();
    assert_eq!(alpha.plan().unwrap().current_step, 1);
    let beta = host.load("beta").await.unwrap();
    assert_eq!(beta.plan().unwrap().current_step, 2);
}

#[tokio::test]
async fn test_refusal_does_not_persist_changes() {
    let (_temp_dir, host) = create_test_host().await;
    host.execute("guarded", Operation::CreatePlan(analyze_plan()))
        .await
        .unwrap()
        .unwrap();
    let before = host.load("guarded").await.unwrap();

    let refusal = host
        .execute("guarded", Operation::ResetPlan(ResetPlan { confirm: false }))
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(refusal.kind, RefusalKind::Guard);

    let refusal = host
        .execute(
            "guarded",
            Operation::UpdatePlan(UpdatePlan::Remove { step_id: 1 }),
        )
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(refusal.kind, RefusalKind::Ordering);

    assert_eq!(host.load("guarded").await.unwrap(), before);
}

#[tokio::test]
async fn test_concurrent_calls_same_session_are_serialized() {
    let (_temp_dir, host) = create_test_host().await;
    host.execute("busy", Operation::CreatePlan(analyze_plan()))
        .await
        .unwrap()
        .unwrap();

    let (first, second) = tokio::join!(
        host.execute("busy", complete("one")),
        host.execute("busy", complete("two")),
    );
    assert!(first.unwrap().is_ok());
    assert!(second.unwrap().is_ok());

    let state = host.load("busy").await.unwrap();
    assert_eq!(state.status(), PlanStatus::Complete);
}

#[tokio::test]
async fn test_save_learning_requires_approval_and_is_idempotent() {
    let (_temp_dir, host) = create_test_host().await;
    host.execute("learn", Operation::CreatePlan(analyze_plan()))
        .await
        .unwrap()
        .unwrap();

    // not yet complete
    let refusal = host
        .save_learning("learn", proposal(), Approval::Granted)
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(refusal.kind, RefusalKind::Guard);

    host.execute("learn", complete("a")).await.unwrap().unwrap();
    let outcome = host.execute("learn", complete("b")).await.unwrap().unwrap();
    assert!(outcome.learning_opportunity());

    // a tool call alone never carries approval
    let refusal = host
        .execute("learn", Operation::SaveLearning(proposal()))
        .await
        .unwrap()
        .unwrap_err();
    assert_eq!(refusal.kind, RefusalKind::Guard);

    let outcome = host
        .save_learning("learn", proposal(), Approval::Granted)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(
        outcome.event,
        PlanEvent::LearningSaved {
            outcome: RecordOutcome::Saved,
            ..
        }
    ));

    let outcome = host
        .save_learning("learn", proposal(), Approval::Granted)
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(
        outcome.event,
        PlanEvent::LearningSaved {
            outcome: RecordOutcome::AlreadyExists,
            ..
        }
    ));

    let learnings = host.learnings(Some("research")).await.unwrap();
    assert_eq!(learnings.len(), 1);
    assert_eq!(learnings[0].source_objective, "Analyze X");
    assert_eq!(learnings[0].source_steps, 2);
}

#[tokio::test]
async fn test_end_session_clears_store() {
    let (_temp_dir, host) = create_test_host().await;
    host.execute("ending", Operation::CreatePlan(analyze_plan()))
        .await
        .unwrap()
        .unwrap();

    assert!(host.end_session("ending").await.unwrap());
    assert!(!host.end_session("ending").await.unwrap());
    assert!(host.load("ending").await.unwrap().plan.is_none());
}

#[tokio::test]
async fn test_empty_session_id_rejected() {
    let (_temp_dir, host) = create_test_host().await;

    let err = host.execute("  ", Operation::GetStatus).await.unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { .. }));
}
