use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::datastore::DataStore;
use crate::task::Task;

/// Authoritative in-memory task collection. Loaded once at startup and
/// rewritten after every mutation; a failed write is logged and never rolls
/// back the in-memory state.
#[derive(Debug)]
pub struct TaskStore {
    datastore: DataStore,
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    #[tracing::instrument(skip(datastore))]
    pub fn open(datastore: DataStore) -> Self {
        let tasks = match datastore.load_tasks() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(error = %err, "failed to load task slot, starting empty");
                Vec::new()
            }
        };

        let next_id = tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        info!(count = tasks.len(), next_id, "opened task store");

        Self {
            datastore,
            tasks,
            next_id,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Rejects whitespace-only text: no task, no write. Insertion order is
    /// preserved for everything else.
    #[tracing::instrument(skip(self, text, now))]
    pub fn add(
        &mut self,
        text: &str,
        due_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Option<Task> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("rejected empty task text");
            return None;
        }

        let task = Task::new(self.next_id, trimmed.to_string(), due_date, now);
        self.next_id += 1;
        self.tasks.push(task.clone());
        self.persist();

        debug!(id = task.id, count = self.tasks.len(), "task added");
        Some(task)
    }

    /// Flips `completed` and returns the new value; `None` for an unknown id
    /// (no write).
    #[tracing::instrument(skip(self))]
    pub fn toggle(&mut self, id: u64) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.persist();

        debug!(id, completed, "task toggled");
        Some(completed)
    }

    /// Removes the task if present; unknown ids are a no-op, so repeated or
    /// stale references stay harmless.
    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return false;
        }

        self.persist();
        debug!(id, count = self.tasks.len(), "task removed");
        true
    }

    /// Sweeps all completed tasks. When nothing is completed this must not
    /// touch the persisted slot at all.
    #[tracing::instrument(skip(self))]
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let cleared = before - self.tasks.len();
        if cleared == 0 {
            return 0;
        }

        self.persist();
        info!(cleared, count = self.tasks.len(), "cleared completed tasks");
        cleared
    }

    /// Best-effort write of the full collection; in-memory state stays
    /// authoritative for the session when it fails.
    #[tracing::instrument(skip(self))]
    pub fn persist(&self) {
        if let Err(err) = self.datastore.save_tasks(&self.tasks) {
            warn!(error = %err, "failed to persist task slot");
        }
    }
}
