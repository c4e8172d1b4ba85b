pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod datetime;
pub mod export;
pub mod render;
pub mod sanitize;
pub mod store;
pub mod task;
pub mod theme;
pub mod view;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::Cli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;
    info!(verbose = cli.verbose, quiet = cli.quiet, "starting slate CLI");

    let mut cfg = config::Config::load(cli.config.as_deref())?;
    if let Some(color) = cli.color.clone() {
        cfg.color = Some(color);
    }

    let data_dir = config::resolve_data_dir(&cfg, cli.data.as_deref())
        .context("failed to resolve data directory")?;
    debug!(data_dir = %data_dir.display(), "resolved data directory");

    let datastore = datastore::DataStore::open(&data_dir)
        .with_context(|| format!("failed to open datastore at {}", data_dir.display()))?;

    let mut store = store::TaskStore::open(datastore.clone());
    let mut theme = theme::ThemePreference::load(datastore);
    let mut renderer = render::Renderer::new(&cfg, theme.current())?;

    let command = cli.command.unwrap_or(cli::Command::List {
        filter: task::FilterMode::All,
    });
    commands::dispatch(&mut store, &mut theme, &mut renderer, command)?;

    info!("done");
    Ok(())
}
