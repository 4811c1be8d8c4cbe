use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "zim-search-provider")]
#[command(about = "Show Zim notebook pages in GNOME Shell search results", long_about = None)]
pub struct Cli {
    /// Notebook to use as default instead of the one marked in Zim
    pub notebook: Option<String>,
    /// Configuration file (default: $XDG_CONFIG_HOME/zim-search-provider/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Search all notebooks instead of only the default one
    #[arg(long)]
    pub search_all: Option<bool>,
    /// Match page names only instead of running Zim's full-text search
    #[arg(long)]
    pub names_only: Option<bool>,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(notebook) = &self.notebook {
            config.default_notebook = Some(notebook.clone());
        }
        if let Some(search_all) = self.search_all {
            config.search_all = search_all;
        }
        if let Some(names_only) = self.names_only {
            config.names_only = names_only;
        }
    }
}
