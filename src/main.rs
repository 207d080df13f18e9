//! Tick CLI - a lightning-fast terminal task tracker.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::io::Write as _;
use std::path::PathBuf;
use tick::config::{self, UserConfig};
use tick::{
    ClearScope, Priority, ReportFormat, Storage, Store, Task, TaskFilter, TaskPatch, backup,
    parse_priority,
};

mod cli;

use cli::{BackupCommand, Cli, Command};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tick")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tick.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn data_path(cli: &Cli) -> PathBuf {
    cli.file.clone().unwrap_or_else(config::data_path)
}

fn load_user_config() -> UserConfig {
    match UserConfig::load(&config::config_path()) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            UserConfig::default()
        }
    }
}

fn format_priority(priority: Priority) -> ColoredString {
    match priority {
        Priority::Low => "low".green(),
        Priority::Medium => "medium".yellow(),
        Priority::High => "high".red(),
    }
}

fn print_task_line(task: &Task) {
    let status = if task.completed { "✔".green() } else { "○".normal() };
    let text = if task.completed {
        task.text.dimmed().strikethrough()
    } else {
        task.text.normal()
    };
    let tags = if task.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", task.tags.join(", "))
    };
    println!(
        "{} {} {} {}{}",
        status,
        format!("#{}", task.id).cyan(),
        format_priority(task.priority),
        text,
        tags.dimmed()
    );
}

fn print_task_rows(tasks: &[Task]) {
    let mut rows: Vec<&Task> = tasks.iter().collect();
    rows.sort_by_key(|t| (t.completed, t.id));
    for task in rows {
        print_task_line(task);
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Snapshot the data file before a destructive operation.
fn backup_before(action: &str, path: &std::path::Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let backup_path =
        backup::create_backup(path, None).with_context(|| format!("Backup before {} failed", action))?;
    println!("{} {}", "Backup created:".dimmed(), backup_path.display().to_string().dimmed());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let path = data_path(&cli);
    let mut store = Store::new(Storage::new(&path));

    match cli.command {
        Command::Add { text, priority, tags } => {
            let user_config = load_user_config();
            let priority = match priority {
                Some(p) => parse_priority(&p)?,
                None => user_config.defaults.priority,
            };

            // Config-default tags come first, command-line tags after.
            let mut all_tags = user_config.defaults.tags;
            all_tags.extend(tags);

            let task = store.add(&text, priority, &all_tags).context("Failed to add task")?;

            println!(
                "{} Added task {}: {}",
                "✔".green(),
                format!("#{}", task.id).cyan(),
                task.text
            );
            if !task.tags.is_empty() {
                println!("{}", format!("  Tags: {}", task.tags.join(", ")).dimmed());
            }
        }

        Command::Ls { show_all } => {
            let tasks = store.list(show_all).context("Failed to list tasks")?;
            if tasks.is_empty() {
                println!("{}", "No tasks found. Use 'tick add' to create one!".dimmed());
                return Ok(());
            }

            print_task_rows(&tasks);

            let active = tasks.iter().filter(|t| !t.completed).count();
            println!();
            println!(
                "{}",
                format!("Total: {} | Active: {} | Completed: {}", tasks.len(), active, tasks.len() - active)
                    .dimmed()
            );
        }

        Command::Get { id } => {
            let task = store.get(id)?;
            println!("{}: {}", "ID".bold(), format!("#{}", task.id).cyan());
            println!("{}: {}", "Text".bold(), task.text);
            println!("{}: {}", "Priority".bold(), format_priority(task.priority));
            println!("{}: {}", "Completed".bold(), task.completed);
            if !task.tags.is_empty() {
                println!("{}: {}", "Tags".bold(), task.tags.join(", "));
            }
            println!("{}: {}", "Created".bold(), task.created_at);
            if let Some(completed_at) = task.completed_at {
                println!("{}: {}", "Completed at".bold(), completed_at);
            }
        }

        Command::Done { id } => {
            let task = store.complete(id).context("Failed to complete task")?;
            println!("{} Completed: {}", "✔".green(), task.text);
        }

        Command::DoneAll { ids } => {
            let outcome = store.complete_many(&ids).context("Failed to complete tasks")?;

            if !outcome.completed.is_empty() {
                println!("{}", "✔ Completed:".green());
                for task in &outcome.completed {
                    println!("  {}: {}", format!("#{}", task.id).cyan(), task.text);
                }
            }
            if !outcome.missing.is_empty() {
                let missing: Vec<String> = outcome.missing.iter().map(|id| id.to_string()).collect();
                println!("{}", format!("Not found: {}", missing.join(", ")).red());
            }
        }

        Command::Undo { id } => {
            let task = store.undo(id).context("Failed to reactivate task")?;
            println!("{} Reactivated: {}", "✔".green(), task.text);
        }

        Command::Rm { id, yes } => {
            let task = store.get(id)?;
            let confirmed =
                yes || confirm(&format!("Delete task #{}: '{}'?", task.id, task.text))?;
            if !confirmed {
                println!("{}", "Cancelled".yellow());
                return Ok(());
            }

            backup_before("delete", &path)?;
            let removed = store.remove(id, confirmed).context("Failed to remove task")?;
            println!("{} Removed: {}", "✗".red(), removed.text);
        }

        Command::Clear { active, force } => {
            let scope = if active { ClearScope::Active } else { ClearScope::Completed };
            let label = if active { "active" } else { "completed" };

            let tasks = store.list(true)?;
            let count = tasks
                .iter()
                .filter(|t| if active { !t.completed } else { t.completed })
                .count();
            if count == 0 {
                println!("{}", format!("No {} tasks to clear", label).yellow());
                return Ok(());
            }

            let confirmed = force || confirm(&format!("Clear {} {} task(s)?", count, label))?;
            if !confirmed {
                println!("{}", "Cancelled".yellow());
                return Ok(());
            }

            backup_before("clear", &path)?;
            let removed = store.clear(scope, confirmed).context("Failed to clear tasks")?;
            println!("{} Cleared {} {} task(s)", "✔".green(), removed.len(), label);
        }

        Command::Edit { id, text, priority, add_tags, remove_tags } => {
            let patch = TaskPatch {
                text,
                priority: priority.as_deref().map(parse_priority).transpose()?,
                add_tags,
                remove_tags,
            };

            if patch.is_empty() {
                println!("{}", "No changes made".yellow());
                return Ok(());
            }

            let task = store.edit(id, &patch).context("Failed to edit task")?;
            println!("{} Updated task {}", "✔".green(), format!("#{}", task.id).cyan());
            print_task_line(&task);
        }

        Command::Priority { id, priority } => {
            let priority = parse_priority(&priority)?;
            let task = store.set_priority(id, priority).context("Failed to set priority")?;
            println!(
                "{} Changed priority of {} to {}",
                "✔".green(),
                format!("#{}", task.id).cyan(),
                format_priority(task.priority)
            );
        }

        Command::Move { id, new_id } => {
            let task = store.move_task(id, new_id).context("Failed to move task")?;
            println!(
                "{} Moved task from {} to {}",
                "✔".green(),
                format!("#{}", id).cyan(),
                format!("#{}", task.id).cyan()
            );
        }

        Command::Search { query, priority, tags } => {
            let priority = priority.as_deref().map(parse_priority).transpose()?;
            let hits = store.search(&query, priority, &tags).context("Search failed")?;

            if hits.is_empty() {
                println!("{}", format!("No tasks matching '{}'", query).dimmed());
                return Ok(());
            }

            println!("{}", format!("{} task(s) matching '{}':", hits.len(), query).bold());
            print_task_rows(&hits);
        }

        Command::Filter { priority, tags, active, completed } => {
            let filter = TaskFilter {
                priority: priority.as_deref().map(parse_priority).transpose()?,
                tags,
                active_only: active,
                completed_only: completed,
                ..Default::default()
            };

            let hits = store.filter(&filter).context("Filter failed")?;
            if hits.is_empty() {
                println!("{}", "No matching tasks".dimmed());
                return Ok(());
            }

            println!("{}", format!("{} task(s) matching [{}]:", hits.len(), filter.describe()).bold());
            print_task_rows(&hits);
        }

        Command::Tags { no_tags } => {
            if no_tags {
                let untagged = store.untagged_tasks().context("Failed to list tasks")?;
                if untagged.is_empty() {
                    println!("{}", "All tasks have tags".dimmed());
                    return Ok(());
                }
                println!("{}", format!("{} task(s) without tags:", untagged.len()).bold());
                print_task_rows(&untagged);
            } else {
                let counts = store.tag_counts().context("Failed to list tags")?;
                if counts.is_empty() {
                    println!("{}", "No tags found".dimmed());
                    return Ok(());
                }
                println!("{}", "Tags in use:".bold());
                for (tag, count) in counts {
                    println!("  • {} ({} task{})", tag.cyan(), count, if count == 1 { "" } else { "s" });
                }
            }
        }

        Command::Stats { detailed } => {
            let stats = store.stats(detailed).context("Failed to compute stats")?;
            if stats.total == 0 {
                println!("{}", "No tasks to analyze. Add some tasks first!".dimmed());
                return Ok(());
            }

            println!("{}", "Task Statistics".bold().cyan());
            println!();
            println!("{}", "Overview:".bold());
            println!("  • Total tasks: {}", stats.total);
            println!("  • Active: {} ({:.0}%)", stats.active, percent(stats.active, stats.total));
            println!(
                "  • Completed: {} ({:.0}%)",
                stats.completed,
                stats.completion_rate * 100.0
            );
            println!();
            println!("{}", "Priority Distribution (Active):".bold());
            println!("  • {}: {}", "high".red(), stats.by_priority.high);
            println!("  • {}: {}", "medium".yellow(), stats.by_priority.medium);
            println!("  • {}: {}", "low".green(), stats.by_priority.low);
            println!();
            println!("{}", "Today's Progress:".bold());
            println!("  • Completed today: {} task(s)", stats.completed_today);
            println!();
            println!("{}", "Top Tags:".bold());
            if stats.by_tag.is_empty() {
                println!("  • No tags used yet");
            } else {
                for (tag, count) in stats.by_tag.iter().take(3) {
                    println!("  • {}: {} task(s)", tag.cyan(), count);
                }
            }

            if let Some(detail) = stats.detailed {
                println!();
                println!("{}", "Detailed Breakdown:".bold());
                match detail.oldest_active_age_days {
                    Some(age) => println!("  • Oldest active task: {:.1} day(s) old", age),
                    None => println!("  • No active tasks"),
                }
                println!("  • Completion velocity: {:.2} task(s)/day", detail.completed_per_day);
            }
        }

        Command::Report { format, output } => {
            let format = ReportFormat::parse(&format)
                .ok_or_else(|| eyre::eyre!("unknown report format '{}': use text or json", format))?;

            let report = store.report(format).context("Failed to generate report")?;
            match output {
                Some(out) => {
                    fs::write(&out, report)
                        .with_context(|| format!("Failed to write report to {}", out.display()))?;
                    println!("{} Report saved to {}", "✔".green(), out.display());
                }
                None => println!("{}", report),
            }
        }

        Command::Backup { command } => match command {
            BackupCommand::Create { name } => {
                let backup_path = backup::create_backup(&path, name.as_deref())
                    .context("Failed to create backup")?;
                println!("{} Backup created: {}", "✔".green(), backup_path.display());
            }
            BackupCommand::List => {
                let backups = backup::list_backups(&path).context("Failed to list backups")?;
                if backups.is_empty() {
                    println!("{}", "No backups found".dimmed());
                    return Ok(());
                }
                for backup_path in backups {
                    println!("{}", backup_path.display());
                }
            }
            BackupCommand::Restore { backup: name, yes } => {
                let confirmed = yes
                    || confirm(&format!(
                        "Restore '{}' over {}? This overwrites your current tasks.",
                        name,
                        path.display()
                    ))?;
                if !confirmed {
                    println!("{}", "Cancelled".yellow());
                    return Ok(());
                }
                backup::restore_backup(&name, &path).context("Failed to restore backup")?;
                println!("{} Restore complete", "✔".green());
            }
        },
    }

    Ok(())
}

fn percent(part: usize, total: usize) -> f64 {
    part as f64 / total.max(1) as f64 * 100.0
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
