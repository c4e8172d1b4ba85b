use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::task::Task;
use crate::theme::Theme;

/// File-backed key-value slots: one for the serialized task collection, one
/// for the theme preference.
#[derive(Debug, Clone)]
pub struct DataStore {
    pub data_dir: PathBuf,
    pub tasks_path: PathBuf,
    pub theme_path: PathBuf,
}

impl DataStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let tasks_path = data_dir.join("tasks.json");
        let theme_path = data_dir.join("theme");

        info!(
            data_dir = %data_dir.display(),
            tasks = %tasks_path.display(),
            theme = %theme_path.display(),
            "opened datastore"
        );

        Ok(Self {
            data_dir,
            tasks_path,
            theme_path,
        })
    }

    /// A missing slot is an empty collection; unreadable or corrupt contents
    /// are an error the layer above decides how to absorb.
    #[tracing::instrument(skip(self))]
    pub fn load_tasks(&self) -> anyhow::Result<Vec<Task>> {
        if !self.tasks_path.exists() {
            debug!(file = %self.tasks_path.display(), "task slot missing, treating as empty");
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.tasks_path)
            .with_context(|| format!("failed reading {}", self.tasks_path.display()))?;
        let tasks: Vec<Task> = serde_json::from_str(&raw)
            .with_context(|| format!("failed parsing {}", self.tasks_path.display()))?;

        debug!(count = tasks.len(), "loaded task slot");
        Ok(tasks)
    }

    #[tracing::instrument(skip(self, tasks))]
    pub fn save_tasks(&self, tasks: &[Task]) -> anyhow::Result<()> {
        debug!(file = %self.tasks_path.display(), count = tasks.len(), "saving task slot");
        let payload = serde_json::to_string_pretty(tasks).context("failed serializing tasks")?;
        write_atomic(&self.tasks_path, &payload)
    }

    #[tracing::instrument(skip(self))]
    pub fn load_theme(&self) -> anyhow::Result<Option<Theme>> {
        if !self.theme_path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.theme_path)
            .with_context(|| format!("failed reading {}", self.theme_path.display()))?;
        let theme = raw
            .trim()
            .parse::<Theme>()
            .with_context(|| format!("failed parsing {}", self.theme_path.display()))?;
        Ok(Some(theme))
    }

    #[tracing::instrument(skip(self))]
    pub fn save_theme(&self, theme: Theme) -> anyhow::Result<()> {
        debug!(file = %self.theme_path.display(), theme = theme.as_str(), "saving theme slot");
        write_atomic(&self.theme_path, theme.as_str())
    }
}

#[tracing::instrument(skip(path, payload))]
pub(crate) fn write_atomic(path: &Path, payload: &str) -> anyhow::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(payload.as_bytes())?;
    if !payload.ends_with('\n') {
        temp.write_all(b"\n")?;
    }
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}
