use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::Deserialize;
use tracing::{debug, info};

const CONFIG_ENV_VAR: &str = "SLATE_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Where the datastore lives; tilde-expanded. Defaults to `~/.slate`.
    pub data_dir: Option<String>,

    /// `on` or `off`; stdout must also be a terminal for color to apply.
    pub color: Option<String>,
}

impl Config {
    /// Resolution order: explicit `--config` path, then `$SLATE_CONFIG`,
    /// then the default location. Only an explicitly named file is required
    /// to exist.
    #[tracing::instrument(skip(override_path))]
    pub fn load(override_path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = override_path {
            info!(config = %path.display(), "loading config");
            return load_file(path);
        }

        if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                let path = PathBuf::from(trimmed);
                info!(config = %path.display(), "loading config from environment");
                return load_file(&path);
            }
        }

        let Some(path) = default_config_path() else {
            debug!("no config directory available, using defaults");
            return Ok(Self::default());
        };

        if path.exists() {
            info!(config = %path.display(), "loading config");
            load_file(&path)
        } else {
            debug!(config = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

fn load_file(path: &Path) -> anyhow::Result<Config> {
    let path = expand_tilde(path);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

#[tracing::instrument(skip(cfg, override_dir))]
pub fn resolve_data_dir(cfg: &Config, override_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    let dir = if let Some(path) = override_dir {
        path.to_path_buf()
    } else if let Some(cfg_value) = cfg.data_dir.as_deref() {
        expand_tilde(Path::new(cfg_value))
    } else {
        default_data_dir()?
    };

    if !dir.exists() {
        info!(dir = %dir.display(), "creating data directory");
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    Ok(dir)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("slate").join("config.toml"))
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?;
    Ok(home.join(".slate"))
}

fn expand_tilde(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}
