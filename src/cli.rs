//! CLI argument parsing for tick.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tick",
    about = "Lightning-fast terminal task tracker",
    version,
    after_help = "Data lives in ~/.tick/tasks.json (override with TICK_FILE)"
)]
pub struct Cli {
    /// Path to the task data file (default: ~/.tick/tasks.json)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a new task
    Add {
        /// Task text
        text: String,

        /// Priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,

        /// Tags to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List tasks
    Ls {
        /// Show completed tasks too
        #[arg(short = 'a', long = "all")]
        show_all: bool,
    },

    /// Show a task by id
    Get {
        /// Task id
        id: u64,
    },

    /// Mark a task as done
    Done {
        /// Task id
        id: u64,
    },

    /// Mark several tasks as done
    DoneAll {
        /// Task ids
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// Reactivate a completed task
    Undo {
        /// Task id
        id: u64,
    },

    /// Remove a task
    Rm {
        /// Task id
        id: u64,

        /// Skip confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// Clear completed (default) or active tasks
    Clear {
        /// Clear active tasks instead of completed ones
        #[arg(long)]
        active: bool,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Edit a task
    Edit {
        /// Task id
        id: u64,

        /// New task text
        #[arg(short, long)]
        text: Option<String>,

        /// New priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,

        /// Tags to add (repeatable)
        #[arg(long = "add-tag")]
        add_tags: Vec<String>,

        /// Tags to remove (repeatable)
        #[arg(long = "remove-tag")]
        remove_tags: Vec<String>,
    },

    /// Quick priority change
    Priority {
        /// Task id
        id: u64,

        /// New priority (low, medium, high)
        priority: String,
    },

    /// Renumber a task to a different id
    Move {
        /// Current task id
        id: u64,

        /// New task id
        new_id: u64,
    },

    /// Search tasks by text
    Search {
        /// Substring to look for (case-insensitive)
        query: String,

        /// Restrict to a priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,

        /// Restrict to tasks with any of these tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Filter tasks by priority, tags, or status
    Filter {
        /// Restrict to a priority (low, medium, high)
        #[arg(short, long)]
        priority: Option<String>,

        /// Restrict to tasks with any of these tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Only active tasks
        #[arg(short, long)]
        active: bool,

        /// Only completed tasks
        #[arg(short, long)]
        completed: bool,
    },

    /// List tags in use, or tasks without tags
    Tags {
        /// Show tasks without tags instead
        #[arg(long)]
        no_tags: bool,
    },

    /// Show task statistics
    Stats {
        /// Include age and velocity metrics
        #[arg(short, long)]
        detailed: bool,
    },

    /// Generate a task report
    Report {
        /// Output format (text, json)
        #[arg(short = 'F', long, default_value = "text")]
        format: String,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Back up and restore the task data file
    Backup {
        #[command(subcommand)]
        command: BackupCommand,
    },
}

#[derive(Subcommand)]
pub enum BackupCommand {
    /// Create a timestamped backup
    Create {
        /// Base name for the backup file
        name: Option<String>,
    },

    /// List available backups, newest first
    List,

    /// Restore the data file from a backup
    Restore {
        /// Backup file name or path
        backup: String,

        /// Skip confirmation
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}
