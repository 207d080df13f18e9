//! Aggregate statistics over the task collection.

use crate::types::{Priority, Task};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Counts and rates for display or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    /// completed / total, 0 when the collection is empty
    pub completion_rate: f64,
    /// Active tasks per priority level
    pub by_priority: PriorityBreakdown,
    /// Tag usage across all tasks, most used first
    pub by_tag: Vec<(String, usize)>,
    pub completed_today: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed: Option<DetailedStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PriorityBreakdown {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetailedStats {
    /// Age in days of the oldest still-active task, if any
    pub oldest_active_age_days: Option<f64>,
    /// Completions per day since the earliest `created_at`
    pub completed_per_day: f64,
}

/// Compute statistics over the collection as of `now`.
pub fn compute(tasks: &[Task], detailed: bool, now: DateTime<Utc>) -> Stats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let active = total - completed;

    let mut by_priority = PriorityBreakdown::default();
    for task in tasks.iter().filter(|t| !t.completed) {
        match task.priority {
            Priority::Low => by_priority.low += 1,
            Priority::Medium => by_priority.medium += 1,
            Priority::High => by_priority.high += 1,
        }
    }

    let today = now.date_naive();
    let completed_today = tasks
        .iter()
        .filter(|t| t.completed_at.is_some_and(|at| at.date_naive() == today))
        .count();

    Stats {
        total,
        active,
        completed,
        completion_rate: if total == 0 { 0.0 } else { completed as f64 / total as f64 },
        by_priority,
        by_tag: tag_counts(tasks),
        completed_today,
        detailed: detailed.then(|| compute_detailed(tasks, completed, now)),
    }
}

fn compute_detailed(tasks: &[Task], completed: usize, now: DateTime<Utc>) -> DetailedStats {
    let oldest_active_age_days = tasks
        .iter()
        .filter(|t| !t.completed)
        .map(|t| t.created_at)
        .min()
        .map(|created| days_between(created, now));

    let completed_per_day = match tasks.iter().map(|t| t.created_at).min() {
        // Spans shorter than a day count as one day.
        Some(earliest) => completed as f64 / days_between(earliest, now).max(1.0),
        None => 0.0,
    };

    DetailedStats { oldest_active_age_days, completed_per_day }
}

fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds().max(0) as f64 / 86_400.0
}

/// Distinct tags with usage counts, descending by count then by name.
pub fn tag_counts(tasks: &[Task]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for task in tasks {
        for tag in &task.tags {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }
    let mut counts: Vec<(String, usize)> =
        counts.into_iter().map(|(tag, n)| (tag.to_string(), n)).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}
