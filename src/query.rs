//! Predicate machinery shared by `search` and `filter`.

use crate::store::StoreError;
use crate::types::{Priority, Task};
use eyre::Result;

/// Conjunction of optional task predicates.
///
/// Unset fields match everything. `text` is a case-insensitive substring
/// match; `tags` matches tasks carrying at least one of the listed tags.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
    pub active_only: bool,
    pub completed_only: bool,
}

impl TaskFilter {
    /// Reject contradictory status flags.
    pub fn validate(&self) -> Result<()> {
        if self.active_only && self.completed_only {
            return Err(eyre::eyre!(StoreError::InvalidFilter));
        }
        Ok(())
    }

    pub fn matches(&self, task: &Task) -> bool {
        if self.active_only && task.completed {
            return false;
        }
        if self.completed_only && !task.completed {
            return false;
        }
        if let Some(priority) = self.priority
            && task.priority != priority
        {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|t| task.has_tag(t)) {
            return false;
        }
        if let Some(query) = &self.text
            && !task.text.to_lowercase().contains(&query.to_lowercase())
        {
            return false;
        }
        true
    }

    /// Human-readable description of the active predicates.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(query) = &self.text {
            parts.push(format!("text~'{}'", query));
        }
        if let Some(priority) = self.priority {
            parts.push(format!("priority={}", priority));
        }
        if !self.tags.is_empty() {
            parts.push(format!("tags={}", self.tags.join("|")));
        }
        if self.active_only {
            parts.push("active".to_string());
        }
        if self.completed_only {
            parts.push("completed".to_string());
        }
        if parts.is_empty() {
            "all".to_string()
        } else {
            parts.join(" AND ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_task(text: &str, priority: Priority, tags: &[&str], completed: bool) -> Task {
        Task {
            id: 1,
            text: text.to_string(),
            priority,
            completed,
            created_at: Utc::now(),
            completed_at: completed.then(Utc::now),
            tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = TaskFilter::default();
        assert!(filter.matches(&make_task("anything", Priority::Low, &[], false)));
        assert!(filter.matches(&make_task("done", Priority::High, &["x"], true)));
    }

    #[test]
    fn test_text_match_is_case_insensitive() {
        let filter = TaskFilter { text: Some("REPORT".to_string()), ..Default::default() };
        assert!(filter.matches(&make_task("write quarterly report", Priority::Medium, &[], false)));
        assert!(!filter.matches(&make_task("water plants", Priority::Medium, &[], false)));
    }

    #[test]
    fn test_tag_match_is_any_of() {
        let filter = TaskFilter {
            tags: vec!["home".to_string(), "urgent".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&make_task("a", Priority::Medium, &["urgent"], false)));
        assert!(!filter.matches(&make_task("b", Priority::Medium, &["work"], false)));
        assert!(!filter.matches(&make_task("c", Priority::Medium, &[], false)));
    }

    #[test]
    fn test_status_flags() {
        let active = TaskFilter { active_only: true, ..Default::default() };
        let completed = TaskFilter { completed_only: true, ..Default::default() };
        let done = make_task("done", Priority::Medium, &[], true);
        let open = make_task("open", Priority::Medium, &[], false);

        assert!(active.matches(&open));
        assert!(!active.matches(&done));
        assert!(completed.matches(&done));
        assert!(!completed.matches(&open));
    }

    #[test]
    fn test_conflicting_flags_invalid() {
        let filter = TaskFilter { active_only: true, completed_only: true, ..Default::default() };
        let err = filter.validate().unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::InvalidFilter)));
    }

    #[test]
    fn test_predicates_intersect() {
        let filter = TaskFilter {
            text: Some("buy".to_string()),
            priority: Some(Priority::High),
            tags: vec!["errand".to_string()],
            ..Default::default()
        };
        assert!(filter.matches(&make_task("Buy milk", Priority::High, &["errand"], false)));
        assert!(!filter.matches(&make_task("Buy milk", Priority::Low, &["errand"], false)));
        assert!(!filter.matches(&make_task("Buy milk", Priority::High, &["other"], false)));
    }

    #[test]
    fn test_describe() {
        assert_eq!(TaskFilter::default().describe(), "all");
        let filter = TaskFilter {
            priority: Some(Priority::High),
            tags: vec!["x".to_string()],
            active_only: true,
            ..Default::default()
        };
        assert_eq!(filter.describe(), "priority=high AND tags=x AND active");
    }
}
