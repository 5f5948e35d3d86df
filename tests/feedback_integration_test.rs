//! Feedback loop integration tests
//!
//! Suggest, send feedback, re-run: the component that carried the
//! suggestion must contribute more after helpful feedback and less after
//! unhelpful feedback.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use triage::domain::models::Component;
use triage::{ScoredTask, WeightVector};

use common::{get, post_json, router, service, suggest_uri};

/// Effort dominates this task's score: distant deadline, low importance,
/// half an hour of work.
fn quick_win_batch() -> Vec<Value> {
    vec![json!({
        "id": "q",
        "title": "Quick fix",
        "due_date": "2025-06-30",
        "importance": 1,
        "estimated_hours": 0.5
    })]
}

fn contribution(task: &ScoredTask, weights: &WeightVector, component: Component) -> f64 {
    weights.get(component) * task.components.get(component)
}

#[test]
fn test_helpful_feedback_increases_reinforced_contribution() {
    let service = service();
    let batch = quick_win_batch();

    let before = service.analyze(&batch, None, None).unwrap();
    let set = service.suggest(&batch, None, None).unwrap();
    assert_eq!(set.suggestions.len(), 1);

    let outcome = service.feedback(&["q".to_string()], true);
    assert_eq!(outcome.adjusted, vec![Component::Effort]);

    let after = service.analyze(&batch, None, None).unwrap();
    let old = contribution(&before.tasks[0], &before.weights, Component::Effort);
    let new = contribution(&after.tasks[0], &after.weights, Component::Effort);
    assert!(new > old, "effort contribution {new} should exceed {old}");
    assert!((after.weights.sum() - 1.0).abs() < 1e-9);
}

#[test]
fn test_unhelpful_feedback_decreases_reinforced_contribution() {
    let service = service();
    let batch = quick_win_batch();

    let before = service.analyze(&batch, None, None).unwrap();
    service.suggest(&batch, None, None).unwrap();

    let outcome = service.feedback(&["q".to_string()], false);
    assert_eq!(outcome.adjusted, vec![Component::Effort]);

    let after = service.analyze(&batch, None, None).unwrap();
    let old = contribution(&before.tasks[0], &before.weights, Component::Effort);
    let new = contribution(&after.tasks[0], &after.weights, Component::Effort);
    assert!(new < old, "effort contribution {new} should be below {old}");
}

#[test]
fn test_repeated_unhelpful_feedback_respects_floor() {
    let service = service();
    let batch = quick_win_batch();
    service.suggest(&batch, None, None).unwrap();

    for _ in 0..50 {
        service.feedback(&["q".to_string()], false);
    }

    let weights = service.current_weights();
    assert!(weights.effort >= 0.05 - 1e-9);
    assert!((weights.sum() - 1.0).abs() < 1e-9);
}

#[test]
fn test_feedback_for_unknown_tasks_adjusts_urgency_and_importance() {
    let service = service();
    let before = service.current_weights();

    let outcome = service.feedback(&["never-suggested".to_string()], true);

    assert_eq!(outcome.matched, 0);
    assert_eq!(
        outcome.adjusted,
        vec![Component::Urgency, Component::Importance]
    );
    let after = service.current_weights();
    assert!(after.urgency > before.urgency);
    assert!(after.importance > before.importance);
    assert!(after.effort < before.effort);
}

#[tokio::test]
async fn test_feedback_over_http_updates_shared_weights() {
    let app = router();
    let batch = Value::Array(quick_win_batch());

    let (_, initial) = get(&app, "/weights").await;

    let (status, _) = get(&app, &suggest_uri(&batch, None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &app,
        "/feedback",
        &json!({"selected": ["q"], "helpful": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (_, updated) = get(&app, "/weights").await;
    assert!(updated["effort"].as_f64().unwrap() > initial["effort"].as_f64().unwrap());

    let (_, analysis) = post_json(&app, "/analyze", &json!({"tasks": batch})).await;
    let reported = analysis["result"]["weights"]["effort"].as_f64().unwrap();
    assert!((reported - updated["effort"].as_f64().unwrap()).abs() < 1e-12);
}

#[tokio::test]
async fn test_feedback_accepts_numeric_ids_like_analyze() {
    let app = router();
    let batch = json!([{
        "id": 1,
        "title": "Quick fix",
        "due_date": "2025-06-30",
        "importance": 1,
        "estimated_hours": 0.5
    }]);

    let (_, initial) = get(&app, "/weights").await;
    let (status, _) = get(&app, &suggest_uri(&batch, None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &app,
        "/feedback",
        &json!({"selected": [1], "helpful": true}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    // Matched the recorded profile, so effort was reinforced rather than
    // the urgency/importance fallback
    let (_, updated) = get(&app, "/weights").await;
    assert!(updated["effort"].as_f64().unwrap() > initial["effort"].as_f64().unwrap());
}
