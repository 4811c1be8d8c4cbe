//! Provider configuration, read once at startup.

use crate::error::Result;
use anyhow::{Context, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory name under `$XDG_CONFIG_HOME` holding `config.toml`.
const CONFIG_DIR: &str = "zim-search-provider";

/// Provider settings.
///
/// Every field has a default, so an absent or partial `config.toml` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Search every registered notebook instead of only the default one
    pub search_all: bool,
    /// Match page names only (fast) instead of running Zim's full-text search
    pub names_only: bool,
    /// Prefix that turns a query term into a notebook filter
    pub filter_marker: String,
    /// Notebook to treat as default instead of the one marked in `notebooks.list`
    pub default_notebook: Option<String>,
    /// Zim executable used for full-text search and for opening pages
    pub zim_command: PathBuf,
    /// Location of Zim's `notebooks.list`
    pub notebooks_list: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_all: true,
            names_only: true,
            filter_marker: "#".to_string(),
            default_notebook: None,
            zim_command: PathBuf::from("zim"),
            notebooks_list: None,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the user config file is used
    /// when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("In config file {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.filter_marker.is_empty() {
            bail!("filter_marker must not be empty");
        }
        Ok(())
    }

    /// Path of Zim's notebook list, configured or `$XDG_CONFIG_HOME/zim/notebooks.list`.
    pub fn notebooks_list_path(&self) -> Option<PathBuf> {
        self.notebooks_list
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join("zim").join("notebooks.list")))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join("config.toml"))
}
