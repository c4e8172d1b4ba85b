use std::path::PathBuf;

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info, instrument};

use crate::cli::Command;
use crate::datetime::local_today;
use crate::export;
use crate::render::Renderer;
use crate::store::TaskStore;
use crate::task::FilterMode;
use crate::theme::ThemePreference;
use crate::view;

#[instrument(skip(store, theme, renderer, command))]
pub fn dispatch(
    store: &mut TaskStore,
    theme: &mut ThemePreference,
    renderer: &mut Renderer,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Add { text, due } => cmd_add(store, &text, due),
        Command::Done { id } => cmd_done(store, id),
        Command::Rm { id } => cmd_rm(store, id),
        Command::Clear => cmd_clear(store),
        Command::List { filter } => cmd_list(store, renderer, filter),
        Command::Export { dir } => cmd_export(store, dir),
        Command::Theme { toggle } => cmd_theme(theme, toggle),
    }
}

#[instrument(skip(store, text, due))]
fn cmd_add(store: &mut TaskStore, text: &[String], due: Option<NaiveDate>) -> anyhow::Result<()> {
    info!("command add");

    let text = text.join(" ");
    match store.add(&text, due, Utc::now()) {
        Some(task) => println!("Created task {}.", task.id),
        None => debug!("empty task text, nothing created"),
    }
    Ok(())
}

#[instrument(skip(store))]
fn cmd_done(store: &mut TaskStore, id: u64) -> anyhow::Result<()> {
    info!("command done");

    match store.toggle(id) {
        Some(true) => println!("Completed task {id}."),
        Some(false) => println!("Reopened task {id}."),
        None => println!("No task with id {id}."),
    }
    Ok(())
}

#[instrument(skip(store))]
fn cmd_rm(store: &mut TaskStore, id: u64) -> anyhow::Result<()> {
    info!("command rm");

    if store.remove(id) {
        println!("Deleted task {id}.");
    } else {
        println!("No task with id {id}.");
    }
    Ok(())
}

#[instrument(skip(store))]
fn cmd_clear(store: &mut TaskStore) -> anyhow::Result<()> {
    info!("command clear");

    let cleared = store.clear_completed();
    if cleared == 0 {
        println!("No completed tasks to clear.");
    } else {
        let noun = if cleared == 1 { "task" } else { "tasks" };
        println!("Cleared {cleared} completed {noun}.");
    }
    Ok(())
}

#[instrument(skip(store, renderer))]
fn cmd_list(store: &TaskStore, renderer: &mut Renderer, filter: FilterMode) -> anyhow::Result<()> {
    info!(filter = %filter, "command list");

    let today = local_today();
    let projection = view::project(store.tasks(), filter);
    let counts = view::counts(store.tasks());
    renderer.print_projection(&projection, &counts, today)
}

#[instrument(skip(store, dir))]
fn cmd_export(store: &TaskStore, dir: Option<PathBuf>) -> anyhow::Result<()> {
    info!("command export");

    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    let now = Local::now().naive_local();
    match export::write_report(&dir, store.tasks(), now)? {
        Some(path) => {
            let count = store.tasks().len();
            let noun = if count == 1 { "task" } else { "tasks" };
            println!("Exported {count} {noun} to {}.", path.display());
        }
        None => eprintln!("Nothing to export: the task list is empty."),
    }
    Ok(())
}

#[instrument(skip(theme))]
fn cmd_theme(theme: &mut ThemePreference, toggle: bool) -> anyhow::Result<()> {
    info!(toggle, "command theme");

    if toggle {
        let theme = theme.toggle();
        println!("Theme set to {theme}.");
    } else {
        println!("Theme: {}", theme.current());
    }
    Ok(())
}
