use crate::domain::{Task, TaskStatus};
use crate::persistence::{atomic_write, json_export_file, log_export_file};
use crate::timefmt::format_human;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use std::path::{Path, PathBuf};

fn rule(c: char) -> String {
    c.to_string().repeat(60)
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "Completed",
        TaskStatus::Running => "In progress",
        TaskStatus::Paused => "Paused",
    }
}

/// Render the activity log as plain text: day sections newest first,
/// tasks in creation order within each day. Passing a date restricts
/// the log to that day.
pub fn generate_log_text(
    tasks: &[Task],
    date: Option<NaiveDate>,
    generated_at: DateTime<Local>,
) -> String {
    let mut lines = Vec::new();

    lines.push(rule('='));
    lines.push("RUPT - ACTIVITY LOG".to_string());
    lines.push(rule('='));
    lines.push(String::new());

    match date {
        Some(date) => lines.push(format!("Date: {}", date.format("%d/%m/%Y"))),
        None => lines.push("FULL LOG".to_string()),
    }
    lines.push(format!(
        "Generated at: {}",
        generated_at.format("%d/%m/%Y %H:%M:%S")
    ));
    lines.push(String::new());
    lines.push(rule('='));
    lines.push(String::new());

    let mut days: Vec<NaiveDate> = tasks
        .iter()
        .map(|t| t.created_at.date_naive())
        .filter(|d| date.is_none() || date == Some(*d))
        .collect();
    days.sort();
    days.dedup();
    days.reverse();

    for day in days {
        let mut day_tasks: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.created_at.date_naive() == day)
            .collect();
        day_tasks.sort_by_key(|t| t.created_at);

        let day_total: u64 = day_tasks.iter().map(|t| t.total_duration_seconds).sum();

        lines.push(format!("DATE: {}", day.format("%d/%m/%Y")));
        lines.push(format!("Day total: {}", format_human(day_total)));
        lines.push(rule('-'));
        lines.push(String::new());

        for (index, task) in day_tasks.iter().enumerate() {
            lines.push(format!("{}. {}", index + 1, task.description));
            if !task.requester.is_empty() {
                lines.push(format!("   Requested by: {}", task.requester));
            }
            lines.push(format!("   Started: {}", task.started_at.format("%H:%M")));
            lines.push(format!(
                "   Duration: {}",
                format_human(task.total_duration_seconds)
            ));
            lines.push(format!("   Status: {}", status_label(task.status)));
            if task.is_urgent {
                lines.push("   URGENT".to_string());
            }
            if task.manually_edited {
                lines.push("   Timer edited manually".to_string());
            }
            lines.push(String::new());
        }

        lines.push(String::new());
    }

    lines.push(rule('='));
    lines.push("END OF LOG".to_string());
    lines.push(rule('='));

    lines.join("\n")
}

/// Write the activity log to `output`, or to the default path in the
/// data directory. Returns the path written.
pub fn write_log(
    tasks: &[Task],
    date: Option<NaiveDate>,
    output: Option<PathBuf>,
    generated_at: DateTime<Local>,
) -> Result<PathBuf> {
    let path = match output {
        Some(path) => path,
        None => log_export_file(date)?,
    };
    let text = generate_log_text(tasks, date, generated_at);
    atomic_write(&path, &text)?;
    Ok(path)
}

/// Write the raw task snapshot as pretty JSON for backup or transfer.
pub fn write_json_export(
    tasks: &[Task],
    output: Option<PathBuf>,
    today: NaiveDate,
) -> Result<PathBuf> {
    let path = match output {
        Some(path) => path,
        None => json_export_file(today)?,
    };
    let json = serde_json::to_string_pretty(tasks)?;
    atomic_write(&path, &json)?;
    Ok(path)
}

/// Read a JSON task export for import. Entries that don't decode as
/// tasks are skipped; an import with nothing usable is an error.
pub fn read_tasks_json<P: AsRef<Path>>(path: P) -> Result<Vec<Task>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file: {}", path.display()))?;

    let values: Vec<serde_json::Value> = serde_json::from_str(&content)
        .context("Import file does not contain a JSON array of tasks")?;

    let tasks: Vec<Task> = values
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .filter(|task: &Task| !task.description.trim().is_empty())
        .collect();

    if tasks.is_empty() {
        anyhow::bail!("No valid tasks found in {}", path.display());
    }

    Ok(tasks)
}
