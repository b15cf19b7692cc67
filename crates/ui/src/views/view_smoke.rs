use quiz_core::model::{Question, Topic, TopicKey};
use storage::repository::{InMemoryQuestionStore, Storage};

use super::test_harness::{ViewKind, setup_view_harness};

fn storage() -> Storage {
    let store = InMemoryQuestionStore::new();
    let questions = vec![
        Question::new("Which article?", vec!["1".into(), "2".into()], "2", None).unwrap(),
        Question::new("Which year?", vec!["1982".into(), "1961".into()], "1982", None).unwrap(),
    ];
    store
        .insert(
            Topic::new(TopicKey::new("anayasa").unwrap(), "Türkiye Cumhuriyeti Anayasası"),
            questions,
        )
        .unwrap();
    store
        .insert(Topic::new(TopicKey::new("empty").unwrap(), "Empty topic"), Vec::new())
        .unwrap();
    Storage::in_memory(store)
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_topics() {
    let mut harness = setup_view_harness(ViewKind::Home, &storage());
    harness.rebuild();

    let html = harness.drive_until("Empty topic").await;
    assert!(
        html.contains("Türkiye Cumhuriyeti Anayasası"),
        "missing topic title in {html}"
    );
    assert!(html.contains("/quiz/anayasa"), "missing quiz link in {html}");
    assert!(html.contains("up to 20 questions"), "missing settings hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_questions_and_timer() {
    let mut harness = setup_view_harness(ViewKind::Quiz("anayasa".into()), &storage());
    harness.rebuild();

    let html = harness.drive_until("Submit").await;
    assert!(html.contains("Which article?"), "missing question in {html}");
    assert!(html.contains("Which year?"), "missing question in {html}");
    assert!(html.contains("20:00"), "missing countdown in {html}");
    assert!(html.contains("0 / 2 answered"), "missing progress in {html}");
    assert!(html.contains("2 questions unanswered"), "missing warning in {html}");
    assert!(!html.contains("Attempt"), "first attempt should not be numbered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Quiz("empty".into()), &storage());
    harness.rebuild();

    let html = harness.drive_until("No questions").await;
    assert!(
        html.contains("No questions are available for this topic yet."),
        "missing empty state in {html}"
    );
}
