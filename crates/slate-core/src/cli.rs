use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::datetime::parse_due_date;
use crate::task::FilterMode;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "slate",
    version,
    about = "Slate: a local task list manager",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[arg(long = "color", global = true)]
    pub color: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a task; whitespace-only text is quietly refused
    Add {
        text: Vec<String>,

        #[arg(long, value_parser = clap::builder::ValueParser::new(parse_due_date))]
        due: Option<NaiveDate>,
    },

    /// Toggle a task between active and completed
    Done { id: u64 },

    /// Delete a task
    Rm { id: u64 },

    /// Delete every completed task
    Clear,

    /// Show the task list (default when no command is given)
    List {
        #[arg(
            long,
            default_value = "all",
            value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<FilterMode>())
        )]
        filter: FilterMode,
    },

    /// Write the task list to todos-YYYY-MM-DD.txt
    Export {
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Show the color theme, or flip it with --toggle
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
