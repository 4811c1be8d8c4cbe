//! Zim-backed registry, notebooks and viewer.
//!
//! Page enumeration reads the notebook folder directly. Full-text search and
//! opening pages go through the `zim` executable.

use super::list::{NotebookEntry, read_notebook_list};
use super::traits::{Notebook, NotebookRegistry, Viewer};
use crate::error::Result;
use crate::types::{NotebookInfo, PageName, StoreName};
use anyhow::{Context, bail};
use async_trait::async_trait;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;

/// File extension of Zim page files.
const PAGE_EXTENSION: &str = "txt";

/// Notebook registry backed by Zim's `notebooks.list`.
///
/// The list is re-read on every call, so notebooks added in Zim show up
/// without restarting the provider.
#[derive(Debug, Clone)]
pub struct ZimRegistry {
    list_path: Option<PathBuf>,
    zim_command: PathBuf,
}

impl ZimRegistry {
    pub fn new(list_path: Option<PathBuf>, zim_command: PathBuf) -> Self {
        Self {
            list_path,
            zim_command,
        }
    }

    async fn entries(&self) -> Result<Vec<NotebookEntry>> {
        match &self.list_path {
            Some(path) => read_notebook_list(path).await,
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl NotebookRegistry for ZimRegistry {
    async fn list(&self) -> Result<Vec<NotebookInfo>> {
        Ok(self
            .entries()
            .await?
            .into_iter()
            .map(|entry| NotebookInfo::new(entry.name, entry.is_default))
            .collect())
    }

    async fn open(&self, name: &StoreName) -> Result<Option<Arc<dyn Notebook>>> {
        let Some(entry) = self
            .entries()
            .await?
            .into_iter()
            .find(|entry| &entry.name == name)
        else {
            return Ok(None);
        };

        let notebook = ZimNotebook::open(entry, self.zim_command.clone()).await?;
        Ok(Some(Arc::new(notebook)))
    }
}

/// An opened Zim notebook folder.
#[derive(Debug, Clone)]
pub struct ZimNotebook {
    name: StoreName,
    root: PathBuf,
    zim_command: PathBuf,
}

impl ZimNotebook {
    /// Open a registered notebook, checking that its folder exists.
    pub async fn open(entry: NotebookEntry, zim_command: PathBuf) -> Result<Self> {
        let metadata = tokio::fs::metadata(&entry.root).await.with_context(|| {
            format!(
                "Notebook '{}' folder {} is not accessible",
                entry.name,
                entry.root.display()
            )
        })?;
        if !metadata.is_dir() {
            bail!(
                "Notebook '{}' location {} is not a directory",
                entry.name,
                entry.root.display()
            );
        }

        Ok(Self {
            name: entry.name,
            root: entry.root,
            zim_command,
        })
    }
}

#[async_trait]
impl Notebook for ZimNotebook {
    fn name(&self) -> &StoreName {
        &self.name
    }

    async fn search(&self, query: &str) -> Result<Vec<PageName>> {
        let output = Command::new(&self.zim_command)
            .arg("--search")
            .arg(&self.root)
            .arg(query)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Failed to run {}", self.zim_command.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("zim --search exited with {}: {}", output.status, stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PageName::from)
            .collect())
    }

    async fn walk(&self) -> Result<Vec<PageName>> {
        let root = self.root.clone();

        tokio::task::spawn_blocking(move || {
            let mut pages: Vec<PageName> = WalkBuilder::new(&root)
                .standard_filters(false)
                .hidden(true)
                .build()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_some_and(|t| t.is_file()))
                .filter_map(|e| {
                    let relative = e.path().strip_prefix(&root).ok()?;
                    page_name_from_path(relative)
                })
                .collect();

            pages.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            Ok(pages)
        })
        .await
        .context("Task panicked")?
    }
}

/// Convert a page file path relative to the notebook root to a page name.
///
/// `Projects/Garden_Plan.txt` becomes `Projects:Garden Plan`. Returns `None`
/// for files that are not pages.
pub fn page_name_from_path(relative: &Path) -> Option<PageName> {
    if relative.extension()?.to_str()? != PAGE_EXTENSION {
        return None;
    }

    let parent = relative.parent().into_iter().flat_map(Path::components);
    let stem = relative.file_stem()?;

    let segments: Vec<String> = parent
        .map(|c| c.as_os_str())
        .chain(std::iter::once(stem))
        .map(|segment| decode_segment(&segment.to_string_lossy()))
        .collect();

    Some(PageName::new(segments.join(":")))
}

fn decode_segment(segment: &str) -> String {
    let spaced = segment.replace('_', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced.clone(),
    }
}

/// Opens pages in the Zim desktop application.
#[derive(Debug, Clone)]
pub struct ZimViewer {
    zim_command: PathBuf,
}

impl ZimViewer {
    pub fn new(zim_command: PathBuf) -> Self {
        Self { zim_command }
    }

    fn spawn(&self, args: &[&str]) -> Result<()> {
        Command::new(&self.zim_command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to launch {}", self.zim_command.display()))?;
        Ok(())
    }
}

#[async_trait]
impl Viewer for ZimViewer {
    async fn present(&self, notebook: &StoreName, page: &PageName, create: bool) -> Result<()> {
        // Zim creates a page that does not exist yet when asked to open it
        tracing::info!(notebook = %notebook, page = %page, create, "Opening page in Zim");
        self.spawn(&[notebook.as_str(), page.as_str()])
    }

    async fn present_default(&self, notebook: Option<&StoreName>, search: &str) -> Result<()> {
        if !search.is_empty() {
            tracing::debug!(search, "Zim cannot take a search from the command line");
        }
        match notebook {
            Some(notebook) => {
                tracing::info!(notebook = %notebook, "Opening notebook in Zim");
                self.spawn(&[notebook.as_str()])
            }
            None => self.spawn(&[]),
        }
    }
}
