use tracing::{debug, warn};

use crate::datastore::DataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(anyhow::anyhow!("unknown theme: {other}")),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted light/dark preference. Lives beside the task collection but in
/// its own slot, and absorbs its own persistence failures.
#[derive(Debug)]
pub struct ThemePreference {
    datastore: DataStore,
    theme: Theme,
}

impl ThemePreference {
    #[tracing::instrument(skip(datastore))]
    pub fn load(datastore: DataStore) -> Self {
        let theme = match datastore.load_theme() {
            Ok(Some(theme)) => theme,
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!(error = %err, "failed to load theme slot, defaulting to light");
                Theme::default()
            }
        };

        debug!(theme = theme.as_str(), "loaded theme preference");
        Self { datastore, theme }
    }

    pub fn current(&self) -> Theme {
        self.theme
    }

    /// Flips the theme and persists best-effort: a failed write keeps the
    /// flipped value for the session.
    #[tracing::instrument(skip(self))]
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.flipped();
        if let Err(err) = self.datastore.save_theme(self.theme) {
            warn!(error = %err, "failed to persist theme preference");
        }
        self.theme
    }
}
