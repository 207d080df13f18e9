//! Core data types for the tick task tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tracked to-do item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Small positive integer, unique across the whole collection
    pub id: u64,

    /// User-supplied description, never empty
    pub text: String,

    /// Urgency level
    #[serde(default)]
    pub priority: Priority,

    /// Whether the task is done
    #[serde(default)]
    pub completed: bool,

    /// Set once at creation, immutable afterwards
    pub created_at: DateTime<Utc>,

    /// Present if and only if `completed` is true
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Freeform tags, duplicates collapsed, insertion order kept
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Task urgency levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse a user-supplied priority name.
    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partial update for [`Task`]: `None` means "leave unchanged".
///
/// An explicit empty value is distinct from absence, so clearing tags goes
/// through `remove_tags` rather than assigning an empty set.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub add_tags: Vec<String>,
    pub remove_tags: Vec<String>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.priority.is_none()
            && self.add_tags.is_empty()
            && self.remove_tags.is_empty()
    }
}

impl Task {
    /// Mark the task completed, stamping `completed_at`.
    ///
    /// Re-completing an already-completed task refreshes the timestamp.
    pub fn mark_done(&mut self, now: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(now);
    }

    /// Return the task to the active state.
    pub fn reactivate(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Append a tag unless already present.
    pub fn add_tag(&mut self, tag: &str) {
        if !tag.is_empty() && !self.has_tag(tag) {
            self.tags.push(tag.to_string());
        }
    }
}

/// Collapse duplicates and drop empty strings, preserving first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
