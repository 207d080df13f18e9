//! Report rendering: human-readable text or a structured JSON document.
//!
//! This module only produces the report; writing it to a file or terminal
//! belongs to the caller.

use crate::stats;
use crate::types::Task;
use chrono::{DateTime, Utc};
use eyre::Result;
use serde_json::json;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn parse(s: &str) -> Option<ReportFormat> {
        match s {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Render the full collection as a report generated at `now`.
pub fn render(tasks: &[Task], format: ReportFormat, now: DateTime<Utc>) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(tasks, now)),
        ReportFormat::Json => render_json(tasks, now),
    }
}

fn render_text(tasks: &[Task], now: DateTime<Utc>) -> String {
    let active: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
    let completed: Vec<&Task> = tasks.iter().filter(|t| t.completed).collect();

    let mut out = String::new();
    let _ = writeln!(out, "TICK TASK REPORT");
    let _ = writeln!(out, "{}", "=".repeat(40));
    let _ = writeln!(out, "Generated: {}", now.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out);
    let _ = writeln!(out, "Total Tasks: {}", tasks.len());
    let _ = writeln!(out, "Active: {}", active.len());
    let _ = writeln!(out, "Completed: {}", completed.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "ACTIVE TASKS:");
    let _ = writeln!(out, "{}", "-".repeat(20));
    for task in &active {
        let _ = writeln!(out, "#{} [{}] {}{}", task.id, task.priority, task.text, tag_suffix(task));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "COMPLETED TASKS:");
    let _ = writeln!(out, "{}", "-".repeat(20));
    for task in &completed {
        let _ = writeln!(out, "#{} [{}] {}{}", task.id, task.priority, task.text, tag_suffix(task));
    }
    out
}

fn tag_suffix(task: &Task) -> String {
    if task.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", task.tags.join(", "))
    }
}

fn render_json(tasks: &[Task], now: DateTime<Utc>) -> Result<String> {
    let summary = stats::compute(tasks, false, now);
    let document = json!({
        "generated": now,
        "summary": summary,
        "tasks": tasks,
    });
    Ok(serde_json::to_string_pretty(&document)?)
}
