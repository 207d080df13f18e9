//! Integration tests for edge cases and invariants.

mod common;

use common::TestEnv;
use std::fs;
use tick::{Priority, TaskPatch};

#[test]
fn test_complete_undo_restores_original_fields() {
    let mut env = TestEnv::new();
    let task = env.add_full("round trip", Priority::High, &["tag"]);

    env.complete(task.id);
    let restored = env.store.undo(task.id).unwrap();

    assert!(!restored.completed);
    assert_eq!(restored.completed_at, None);
    assert_eq!(restored.text, task.text);
    assert_eq!(restored.priority, task.priority);
    assert_eq!(restored.tags, task.tags);
    assert_eq!(restored.created_at, task.created_at);
}

#[test]
fn test_undo_on_active_task_is_harmless() {
    let mut env = TestEnv::new();
    let task = env.add("never completed");

    let undone = env.store.undo(task.id).unwrap();
    assert!(!undone.completed);
    assert_eq!(undone.completed_at, None);
}

#[test]
fn test_completed_at_present_iff_completed() {
    let mut env = TestEnv::new();
    let task = env.add("invariant");

    assert_eq!(task.completed_at, None);
    let done = env.complete(task.id);
    assert!(done.completed && done.completed_at.is_some());
    let undone = env.store.undo(task.id).unwrap();
    assert!(!undone.completed && undone.completed_at.is_none());
}

#[test]
fn test_unicode_text_and_tags() {
    let mut env = TestEnv::new();
    let task = env.add_full("Süßigkeiten kaufen 🍬", Priority::Low, &["日本語"]);

    let reopened = env.reopen();
    let loaded = reopened.get(task.id).unwrap();
    assert_eq!(loaded.text, "Süßigkeiten kaufen 🍬");
    assert_eq!(loaded.tags, vec!["日本語"]);

    let hits = env.store.search("süßigkeiten", None, &[]).unwrap();
    assert_eq!(hits.len(), 1);
}

#[test]
fn test_edit_does_not_duplicate_tags() {
    let mut env = TestEnv::new();
    let task = env.add_full("tagged", Priority::Medium, &["a"]);

    let patch = TaskPatch {
        add_tags: vec!["a".to_string(), "b".to_string(), "b".to_string()],
        ..Default::default()
    };
    let edited = env.store.edit(task.id, &patch).unwrap();
    assert_eq!(edited.tags, vec!["a", "b"]);
}

#[test]
fn test_empty_collection_queries() {
    let env = TestEnv::new();

    assert!(env.store.list(true).unwrap().is_empty());
    assert!(env.store.tag_counts().unwrap().is_empty());
    assert!(env.store.untagged_tasks().unwrap().is_empty());

    let stats = env.store.stats(true).unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.completion_rate, 0.0);
    assert_eq!(stats.detailed.unwrap().oldest_active_age_days, None);

    let report = env.store.report(tick::ReportFormat::Text).unwrap();
    assert!(report.contains("Total Tasks: 0"));
}

#[test]
fn test_insertion_order_is_stable_across_edits() {
    let mut env = TestEnv::new();
    env.add("first");
    env.add("second");
    env.add("third");

    let patch = TaskPatch { text: Some("second, edited".to_string()), ..Default::default() };
    env.store.edit(2, &patch).unwrap();
    env.complete(1);
    env.store.undo(1).unwrap();

    let order: Vec<u64> = env.all_tasks().iter().map(|t| t.id).collect();
    assert_eq!(order, vec![1, 2, 3]);
}

#[test]
fn test_legacy_documents_with_unknown_fields_load() {
    // Files written by older tools may carry extra per-task fields.
    let env = TestEnv::new();
    let legacy = r#"[
        {"id": 1, "text": "old", "created_at": "2023-06-01T08:00:00Z",
         "attachments": ["/tmp/a.png"], "links": ["https://example.com"]}
    ]"#;
    fs::write(env.data_path(), legacy).unwrap();

    let store = env.reopen();
    let task = store.get(1).unwrap();
    assert_eq!(task.text, "old");
    assert!(task.tags.is_empty());
}

#[test]
fn test_timestamps_roundtrip_with_full_precision() {
    let mut env = TestEnv::new();
    let task = env.add("precise");
    env.complete(task.id);

    let first = env.reopen().get(task.id).unwrap();
    // Re-save and load again; nothing may drift.
    env.store.set_priority(task.id, Priority::High).unwrap();
    let second = env.reopen().get(task.id).unwrap();

    assert_eq!(first.created_at, second.created_at);
    assert_eq!(first.completed_at, second.completed_at);
}

#[test]
fn test_large_ids_keep_counter_consistent() {
    let mut env = TestEnv::new();
    env.add("small");
    env.store.move_task(1, 1_000_000).unwrap();

    let next = env.add("after jump");
    assert_eq!(next.id, 1_000_001);
    assert_eq!(env.all_tasks().len(), 2);
}
