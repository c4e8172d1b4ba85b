use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info};

use crate::datastore::write_atomic;
use crate::datetime::format_due_date;
use crate::sanitize::escape;
use crate::task::Task;
use crate::view;

/// Renders the full store snapshot, ignoring the current filter. Returns
/// `None` for an empty store: the caller owes the user a notice instead of
/// producing an empty report.
#[must_use]
pub fn render_report(tasks: &[Task], now: NaiveDateTime) -> Option<String> {
    if tasks.is_empty() {
        return None;
    }

    let counts = view::counts(tasks);
    let mut lines: Vec<String> = Vec::new();

    lines.push("# To-Do List".to_string());
    lines.push(String::new());
    lines.push(format!("Exported: {}", now.format("%m/%d/%Y %H:%M")));
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
    lines.push(format!("Total tasks: {}", counts.total));
    lines.push(format!("Active tasks: {}", counts.active));
    lines.push(format!("Completed tasks: {}", counts.completed));

    let active: Vec<&Task> = tasks.iter().filter(|task| !task.completed).collect();
    if !active.is_empty() {
        lines.push(String::new());
        lines.push("## Active Tasks".to_string());
        lines.push(String::new());
        for task in active {
            lines.push(format!("- [ ] {}", task_line(task)));
        }
    }

    let completed: Vec<&Task> = tasks.iter().filter(|task| task.completed).collect();
    if !completed.is_empty() {
        lines.push(String::new());
        lines.push("## Completed Tasks".to_string());
        lines.push(String::new());
        for task in completed {
            lines.push(format!("- [x] {}", task_line(task)));
        }
    }

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("Generated by slate".to_string());

    Some(lines.join("\n") + "\n")
}

fn task_line(task: &Task) -> String {
    let text = escape(&task.text);
    match task.due_date {
        Some(due) => format!("{} (Due: {})", text, format_due_date(due)),
        None => text,
    }
}

#[must_use]
pub fn export_file_name(today: NaiveDate) -> String {
    format!("todos-{}.txt", today.format("%Y-%m-%d"))
}

/// Writes the report artifact into `dir`. `Ok(None)` is the empty-store
/// refusal, not a failure.
#[tracing::instrument(skip(dir, tasks, now))]
pub fn write_report(
    dir: &Path,
    tasks: &[Task],
    now: NaiveDateTime,
) -> anyhow::Result<Option<PathBuf>> {
    let Some(report) = render_report(tasks, now) else {
        debug!("nothing to export");
        return Ok(None);
    };

    let path = dir.join(export_file_name(now.date()));
    write_atomic(&path, &report)?;
    info!(file = %path.display(), count = tasks.len(), "wrote export artifact");
    Ok(Some(path))
}
