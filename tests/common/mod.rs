//! Shared test infrastructure for tick integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;
use tick::{Priority, Storage, Store, Task};

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub store: Store,
}

impl TestEnv {
    /// Create a new test environment backed by a fresh data file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::new(Storage::new(temp_dir.path().join("tasks.json")));
        Self { temp_dir, store }
    }

    pub fn data_path(&self) -> PathBuf {
        self.temp_dir.path().join("tasks.json")
    }

    /// Open a second store over the same data file, as a new process would.
    pub fn reopen(&self) -> Store {
        Store::new(Storage::new(self.data_path()))
    }

    /// Add a task with default priority and no tags.
    pub fn add(&mut self, text: &str) -> Task {
        self.store.add(text, Priority::Medium, &[]).expect("Failed to add task")
    }

    /// Add a task with the given priority.
    pub fn add_with_priority(&mut self, text: &str, priority: Priority) -> Task {
        self.store.add(text, priority, &[]).expect("Failed to add task")
    }

    /// Add a task with the given priority and tags.
    pub fn add_full(&mut self, text: &str, priority: Priority, tags: &[&str]) -> Task {
        let tags: Vec<String> = tags.iter().map(|s| s.to_string()).collect();
        self.store.add(text, priority, &tags).expect("Failed to add task")
    }

    /// Complete a task by id.
    pub fn complete(&mut self, id: u64) -> Task {
        self.store.complete(id).expect("Failed to complete task")
    }

    /// All tasks including completed ones.
    pub fn all_tasks(&self) -> Vec<Task> {
        self.store.list(true).expect("Failed to list tasks")
    }

    /// Active tasks only.
    pub fn active_tasks(&self) -> Vec<Task> {
        self.store.list(false).expect("Failed to list tasks")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
