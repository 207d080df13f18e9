//! Query and mutation layer over the stored task collection.
//!
//! Every mutating operation is one load → mutate → save unit; nothing is
//! persisted partially. The store never logs or prints; errors go back to
//! the caller.

use crate::query::TaskFilter;
use crate::report::{self, ReportFormat};
use crate::stats::{self, Stats};
use crate::storage::Storage;
use crate::types::{Priority, Task, TaskPatch, normalize_tags};
use chrono::Utc;
use eyre::Result;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Task text empty after trimming, or an otherwise unusable task.
    InvalidTask(String),
    /// Unrecognized priority level.
    InvalidPriority(String),
    /// Contradictory filter flags.
    InvalidFilter,
    /// No task with this id.
    NotFound(u64),
    /// Renumber target already taken.
    DuplicateId(u64),
    /// Destructive operation attempted without explicit confirmation.
    ConfirmationRequired,
    /// Persisted document exists but cannot be parsed.
    CorruptStorage(String),
    /// File system failure, fatal for this invocation.
    StorageIo(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::InvalidTask(msg) => write!(f, "invalid task: {}", msg),
            StoreError::InvalidPriority(s) => {
                write!(f, "invalid priority '{}': must be low, medium, or high", s)
            }
            StoreError::InvalidFilter => {
                write!(f, "cannot filter for active and completed tasks at once")
            }
            StoreError::NotFound(id) => write!(f, "task #{} not found", id),
            StoreError::DuplicateId(id) => write!(f, "task #{} already exists", id),
            StoreError::ConfirmationRequired => write!(f, "confirmation required"),
            StoreError::CorruptStorage(msg) => write!(f, "corrupt task data: {}", msg),
            StoreError::StorageIo(msg) => write!(f, "storage failure: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Parse a user-supplied priority name into the typed level.
pub fn parse_priority(s: &str) -> Result<Priority> {
    Priority::parse(s).ok_or_else(|| eyre::eyre!(StoreError::InvalidPriority(s.to_string())))
}

/// Which tasks `clear` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    Completed,
    Active,
}

/// Per-id outcome of `complete_many`: the batch never aborts on a bad id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub completed: Vec<Task>,
    pub missing: Vec<u64>,
}

/// The main task store.
pub struct Store {
    storage: Storage,
}

impl Store {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Create a new task and return it.
    pub fn add(&mut self, text: &str, priority: Priority, tags: &[String]) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(eyre::eyre!(StoreError::InvalidTask(
                "task text cannot be empty".to_string()
            )));
        }

        let mut collection = self.storage.load()?;
        let task = Task {
            id: collection.next_id,
            text: text.to_string(),
            priority,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
            tags: normalize_tags(tags),
        };
        collection.next_id += 1;
        collection.tasks.push(task.clone());
        self.storage.save(&collection)?;

        Ok(task)
    }

    /// List tasks in insertion order, excluding completed ones by default.
    pub fn list(&self, include_completed: bool) -> Result<Vec<Task>> {
        let collection = self.storage.load()?;
        Ok(collection
            .tasks
            .into_iter()
            .filter(|t| include_completed || !t.completed)
            .collect())
    }

    /// Get a task by id.
    pub fn get(&self, id: u64) -> Result<Task> {
        let collection = self.storage.load()?;
        collection
            .find(id)
            .cloned()
            .ok_or_else(|| eyre::eyre!(StoreError::NotFound(id)))
    }

    /// Mark a task completed.
    ///
    /// Re-completing an already-completed task refreshes `completed_at`
    /// rather than erroring, matching the toggle semantics of `undo`.
    pub fn complete(&mut self, id: u64) -> Result<Task> {
        let mut collection = self.storage.load()?;
        let task = collection
            .find_mut(id)
            .ok_or_else(|| eyre::eyre!(StoreError::NotFound(id)))?;
        task.mark_done(Utc::now());
        let task = task.clone();
        self.storage.save(&collection)?;
        Ok(task)
    }

    /// Complete several tasks in one persistence cycle, collecting per-id
    /// failures instead of aborting the batch.
    pub fn complete_many(&mut self, ids: &[u64]) -> Result<BatchOutcome> {
        let mut collection = self.storage.load()?;
        let mut outcome = BatchOutcome::default();
        let now = Utc::now();

        for &id in ids {
            match collection.find_mut(id) {
                Some(task) => {
                    task.mark_done(now);
                    outcome.completed.push(task.clone());
                }
                None => outcome.missing.push(id),
            }
        }

        if !outcome.completed.is_empty() {
            self.storage.save(&collection)?;
        }
        Ok(outcome)
    }

    /// Reactivate a completed task.
    pub fn undo(&mut self, id: u64) -> Result<Task> {
        let mut collection = self.storage.load()?;
        let task = collection
            .find_mut(id)
            .ok_or_else(|| eyre::eyre!(StoreError::NotFound(id)))?;
        task.reactivate();
        let task = task.clone();
        self.storage.save(&collection)?;
        Ok(task)
    }

    /// Delete a task. The confirmation decision belongs to the caller; an
    /// unconfirmed delete comes back as `ConfirmationRequired` with nothing
    /// removed.
    pub fn remove(&mut self, id: u64, confirmed: bool) -> Result<Task> {
        let mut collection = self.storage.load()?;
        let position = collection
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| eyre::eyre!(StoreError::NotFound(id)))?;

        if !confirmed {
            return Err(eyre::eyre!(StoreError::ConfirmationRequired));
        }

        let removed = collection.tasks.remove(position);
        self.storage.save(&collection)?;
        Ok(removed)
    }

    /// Delete all tasks in the given scope, returning the removed tasks.
    ///
    /// Clearing active tasks is destructive enough to require `force`.
    pub fn clear(&mut self, scope: ClearScope, force: bool) -> Result<Vec<Task>> {
        if scope == ClearScope::Active && !force {
            return Err(eyre::eyre!(StoreError::ConfirmationRequired));
        }

        let mut collection = self.storage.load()?;
        let matches = |t: &Task| match scope {
            ClearScope::Completed => t.completed,
            ClearScope::Active => !t.completed,
        };

        let removed: Vec<Task> = collection.tasks.iter().filter(|t| matches(t)).cloned().collect();
        if removed.is_empty() {
            return Ok(removed);
        }

        collection.tasks.retain(|t| !matches(t));
        self.storage.save(&collection)?;
        Ok(removed)
    }

    /// Apply a partial update; absent patch fields leave the task unchanged.
    pub fn edit(&mut self, id: u64, patch: &TaskPatch) -> Result<Task> {
        if let Some(text) = &patch.text
            && text.trim().is_empty()
        {
            return Err(eyre::eyre!(StoreError::InvalidTask(
                "task text cannot be empty".to_string()
            )));
        }

        let mut collection = self.storage.load()?;
        let task = collection
            .find_mut(id)
            .ok_or_else(|| eyre::eyre!(StoreError::NotFound(id)))?;

        if let Some(text) = &patch.text {
            task.text = text.trim().to_string();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        for tag in &patch.add_tags {
            task.add_tag(tag);
        }
        // Tags missing from the removal list are ignored, not errors.
        task.tags.retain(|t| !patch.remove_tags.contains(t));

        let task = task.clone();
        self.storage.save(&collection)?;
        Ok(task)
    }

    /// Quick priority change.
    pub fn set_priority(&mut self, id: u64, priority: Priority) -> Result<Task> {
        self.edit(id, &TaskPatch { priority: Some(priority), ..Default::default() })
    }

    /// Renumber a task. Moving a task onto its own id is a no-op; moving at
    /// or past `next_id` bumps the counter so future adds stay unique.
    pub fn move_task(&mut self, id: u64, new_id: u64) -> Result<Task> {
        if new_id == 0 {
            return Err(eyre::eyre!(StoreError::InvalidTask(
                "task id must be positive".to_string()
            )));
        }

        let mut collection = self.storage.load()?;
        let position = collection
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| eyre::eyre!(StoreError::NotFound(id)))?;
        if new_id == id {
            return Ok(collection.tasks[position].clone());
        }
        if collection.contains(new_id) {
            return Err(eyre::eyre!(StoreError::DuplicateId(new_id)));
        }

        collection.tasks[position].id = new_id;
        let task = collection.tasks[position].clone();

        if new_id >= collection.next_id {
            collection.next_id = new_id + 1;
        }

        self.storage.save(&collection)?;
        Ok(task)
    }

    /// Case-insensitive substring search, intersected with optional
    /// priority and tag predicates.
    pub fn search(
        &self,
        query: &str,
        priority: Option<Priority>,
        tags: &[String],
    ) -> Result<Vec<Task>> {
        self.filter(&TaskFilter {
            text: Some(query.to_string()),
            priority,
            tags: tags.to_vec(),
            ..Default::default()
        })
    }

    /// Apply a validated filter over the whole collection.
    pub fn filter(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        filter.validate()?;
        let collection = self.storage.load()?;
        Ok(collection.tasks.into_iter().filter(|t| filter.matches(t)).collect())
    }

    /// Distinct tags with usage counts, most used first.
    pub fn tag_counts(&self) -> Result<Vec<(String, usize)>> {
        let collection = self.storage.load()?;
        Ok(stats::tag_counts(&collection.tasks))
    }

    /// Tasks carrying no tags at all.
    pub fn untagged_tasks(&self) -> Result<Vec<Task>> {
        let collection = self.storage.load()?;
        Ok(collection.tasks.into_iter().filter(|t| t.tags.is_empty()).collect())
    }

    /// Aggregate statistics over the collection.
    pub fn stats(&self, detailed: bool) -> Result<Stats> {
        let collection = self.storage.load()?;
        Ok(stats::compute(&collection.tasks, detailed, Utc::now()))
    }

    /// Render a report over the collection. Writing it anywhere is the
    /// caller's job; the store only produces the document.
    pub fn report(&self, format: ReportFormat) -> Result<String> {
        let collection = self.storage.load()?;
        report::render(&collection.tasks, format, Utc::now())
    }
}
