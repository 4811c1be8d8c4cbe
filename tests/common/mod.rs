//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Doubles
//!
//! - [`FakeRegistry`]: in-memory notebook registry that counts opens and logs
//!   every `search`/`walk` call made on the notebooks it hands out
//! - [`RecordingViewer`]: viewer that records what it was asked to present
//!
//! # Available Fixtures
//!
//! - `work_and_personal`: notebooks "Work" and "Personal", "Personal" default
//! - `viewer`: a fresh [`RecordingViewer`]
//!
//! [`TempNotebooks`] builds real Zim notebook folders plus a `notebooks.list`
//! for tests that exercise the Zim registry end to end.

use anyhow::bail;
use async_trait::async_trait;
use rstest::fixture;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use zim_search_provider::{
    Notebook, NotebookInfo, NotebookRegistry, PageName, ResultId, SearchProvider, SearchSettings,
    StoreName, Viewer,
};

/// How a fake notebook behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)] // Variants used across different integration test crates
pub enum Behavior {
    Normal,
    /// Every search and walk fails
    Failing,
    /// Searches and walks never complete
    Stalling,
}

#[derive(Debug, Clone)]
struct Registration {
    info: NotebookInfo,
    pages: Vec<PageName>,
    behavior: Behavior,
}

/// In-memory registry handing out [`FakeNotebook`]s.
#[derive(Debug, Default)]
pub struct FakeRegistry {
    registrations: Mutex<Vec<Registration>>,
    opens: Mutex<HashMap<String, usize>>,
    calls: Arc<Mutex<Vec<String>>>,
    fail_open: Mutex<bool>,
    fail_list: Mutex<bool>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notebook with the given pages.
    pub fn with_notebook(self, name: &str, is_default: bool, pages: &[&str]) -> Self {
        self.register(name, is_default, pages, Behavior::Normal);
        self
    }

    /// Add a notebook with non-default behavior.
    pub fn with_behavior(self, name: &str, behavior: Behavior) -> Self {
        self.register(name, false, &[], behavior);
        self
    }

    /// Register (or re-register) a notebook after construction.
    pub fn register(&self, name: &str, is_default: bool, pages: &[&str], behavior: Behavior) {
        let mut registrations = self.registrations.lock().unwrap();
        registrations.retain(|r| r.info.name.as_str() != name);
        registrations.push(Registration {
            info: NotebookInfo::new(name, is_default),
            pages: pages.iter().map(|p| PageName::from(*p)).collect(),
            behavior,
        });
    }

    /// Make every `open` fail with an error.
    pub fn fail_opens(&self) {
        *self.fail_open.lock().unwrap() = true;
    }

    /// Make every `list` fail with an error.
    pub fn fail_lists(&self) {
        *self.fail_list.lock().unwrap() = true;
    }

    /// How many times `name` was opened.
    pub fn open_count(&self, name: &str) -> usize {
        self.opens.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    /// Calls made on opened notebooks, as `"search <notebook> <query>"` or `"walk <notebook>"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotebookRegistry for FakeRegistry {
    async fn list(&self) -> zim_search_provider::Result<Vec<NotebookInfo>> {
        if *self.fail_list.lock().unwrap() {
            bail!("notebook list unreadable");
        }
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.info.clone())
            .collect())
    }

    async fn open(
        &self,
        name: &StoreName,
    ) -> zim_search_provider::Result<Option<Arc<dyn Notebook>>> {
        if *self.fail_open.lock().unwrap() {
            bail!("registry unavailable");
        }

        let Some(registration) = self
            .registrations
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.info.name == name)
            .cloned()
        else {
            return Ok(None);
        };

        *self.opens.lock().unwrap().entry(name.to_string()).or_insert(0) += 1;

        Ok(Some(Arc::new(FakeNotebook {
            name: name.clone(),
            pages: registration.pages,
            behavior: registration.behavior,
            calls: self.calls.clone(),
        })))
    }
}

/// Notebook whose full-text search is a case-insensitive substring match on page names.
#[derive(Debug)]
pub struct FakeNotebook {
    name: StoreName,
    pages: Vec<PageName>,
    behavior: Behavior,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeNotebook {
    async fn check_behavior(&self) -> zim_search_provider::Result<()> {
        match self.behavior {
            Behavior::Normal => Ok(()),
            Behavior::Failing => bail!("index is corrupt"),
            Behavior::Stalling => std::future::pending().await,
        }
    }
}

#[async_trait]
impl Notebook for FakeNotebook {
    fn name(&self) -> &StoreName {
        &self.name
    }

    async fn search(&self, query: &str) -> zim_search_provider::Result<Vec<PageName>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("search {} {}", self.name, query));
        self.check_behavior().await?;

        let query = query.to_lowercase();
        Ok(self
            .pages
            .iter()
            .filter(|page| page.as_str().to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    async fn walk(&self) -> zim_search_provider::Result<Vec<PageName>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("walk {}", self.name));
        self.check_behavior().await?;
        Ok(self.pages.clone())
    }
}

/// One `present` or `present_default` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presented {
    Page {
        notebook: String,
        page: String,
        create: bool,
    },
    Default {
        notebook: Option<String>,
        search: String,
    },
}

/// Viewer that records requests instead of opening anything.
#[derive(Debug, Default)]
pub struct RecordingViewer {
    presented: Mutex<Vec<Presented>>,
    fail: Mutex<bool>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl RecordingViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every request fail after being recorded.
    pub fn fail_requests(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn presented(&self) -> Vec<Presented> {
        self.presented.lock().unwrap().clone()
    }

    fn record(&self, presented: Presented) -> zim_search_provider::Result<()> {
        self.presented.lock().unwrap().push(presented);
        if *self.fail.lock().unwrap() {
            bail!("viewer crashed");
        }
        Ok(())
    }
}

#[async_trait]
impl Viewer for RecordingViewer {
    async fn present(
        &self,
        notebook: &StoreName,
        page: &PageName,
        create: bool,
    ) -> zim_search_provider::Result<()> {
        self.record(Presented::Page {
            notebook: notebook.to_string(),
            page: page.to_string(),
            create,
        })
    }

    async fn present_default(
        &self,
        notebook: Option<&StoreName>,
        search: &str,
    ) -> zim_search_provider::Result<()> {
        self.record(Presented::Default {
            notebook: notebook.map(ToString::to_string),
            search: search.to_string(),
        })
    }
}

/// Settings with the given modes and the `#` filter marker.
#[allow(dead_code)] // Used across different integration test crates
pub fn settings(search_all: bool, names_only: bool) -> SearchSettings {
    SearchSettings {
        search_all,
        names_only,
        filter_marker: "#".to_string(),
    }
}

/// Build a provider over test doubles.
#[allow(dead_code)] // Used across different integration test crates
pub fn provider(
    registry: &Arc<FakeRegistry>,
    viewer: &Arc<RecordingViewer>,
    settings: SearchSettings,
    default_notebook: Option<&str>,
) -> SearchProvider {
    SearchProvider::new(
        registry.clone(),
        viewer.clone(),
        settings,
        default_notebook.map(StoreName::from),
    )
}

/// Decode identifiers into `(notebook, page, create)` triples.
#[allow(dead_code)] // Used across different integration test crates
pub fn decoded(identifiers: &[String]) -> Vec<(String, String, bool)> {
    identifiers
        .iter()
        .map(|identifier| {
            let id = ResultId::decode(identifier, None)
                .unwrap_or_else(|e| panic!("Identifier should decode: {}", e));
            (id.notebook.to_string(), id.page.to_string(), id.create)
        })
        .collect()
}

/// Registry with "Work" and "Personal" (the default).
#[fixture]
pub fn work_and_personal() -> Arc<FakeRegistry> {
    Arc::new(
        FakeRegistry::new()
            .with_notebook(
                "Work",
                false,
                &["Projects", "Projects:todo", "Projects:Garden:Beans", "Meetings:2024"],
            )
            .with_notebook(
                "Personal",
                true,
                &["Home", "Recipes:Bread", "Journal:Todo List"],
            ),
    )
}

#[fixture]
pub fn viewer() -> Arc<RecordingViewer> {
    Arc::new(RecordingViewer::new())
}

/// Zim notebook folders and a `notebooks.list` in a temp directory.
///
/// Cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempNotebooks {
    _temp: TempDir,
    root: PathBuf,
    notebooks: Vec<(String, PathBuf)>,
    default: Option<String>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempNotebooks {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self {
            _temp: temp,
            root,
            notebooks: Vec::new(),
            default: None,
        }
    }

    /// Create a notebook folder with one empty `.txt` file per page.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn add_notebook(&mut self, name: &str, is_default: bool, pages: &[&str]) {
        let dir = self.root.join("notebooks").join(name);
        std::fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("Failed to create notebook '{}': {}", name, e));
        std::fs::write(dir.join("notebook.zim"), format!("[Notebook]\nname={}\n", name))
            .unwrap_or_else(|e| panic!("Failed to write notebook.zim: {}", e));

        for page in pages {
            let relative = format!("{}.txt", page.replace(':', "/").replace(' ', "_"));
            let file = dir.join(relative);
            if let Some(parent) = file.parent() {
                std::fs::create_dir_all(parent)
                    .unwrap_or_else(|e| panic!("Failed to create page folder: {}", e));
            }
            std::fs::write(&file, "Content-Type: text/x-zim-wiki\n")
                .unwrap_or_else(|e| panic!("Failed to write page '{}': {}", page, e));
        }

        if is_default {
            self.default = Some(name.to_string());
        }
        self.notebooks.push((name.to_string(), dir));
    }

    /// Write `notebooks.list` in Zim's current format and return its path.
    pub fn write_list(&self) -> PathBuf {
        let mut content = String::from("[NotebookList]\n");
        if let Some(default) = &self.default {
            let (_, dir) = self
                .notebooks
                .iter()
                .find(|(name, _)| name == default)
                .expect("Default notebook was added");
            content.push_str(&format!("Default={}\n", dir.display()));
        }
        for (i, (_, dir)) in self.notebooks.iter().enumerate() {
            content.push_str(&format!("{}={}\n", i + 1, dir.display()));
        }
        for (i, (name, dir)) in self.notebooks.iter().enumerate() {
            content.push_str(&format!(
                "\n[Notebook {}]\nuri={}\nname={}\n",
                i + 1,
                dir.display(),
                name
            ));
        }

        let path = self.root.join("notebooks.list");
        std::fs::write(&path, content).expect("Failed to write notebooks.list");
        path
    }

    pub fn path(&self) -> &Path {
        &self.root
    }
}

impl Default for TempNotebooks {
    fn default() -> Self {
        Self::new()
    }
}
