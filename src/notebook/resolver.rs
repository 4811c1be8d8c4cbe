//! Notebook lookup with a process-lifetime cache of opened notebooks.
//!
//! Opening a notebook can be slow, so the first handle opened for a name is
//! kept and reused by every later query. Nothing on the query path removes
//! entries; a notebook changed on disk after it was opened is not re-opened.

use super::traits::{Notebook, NotebookRegistry};
use crate::error::Result;
use crate::types::{NotebookInfo, StoreName};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Resolves notebook names to opened notebooks.
pub struct NotebookResolver {
    registry: Arc<dyn NotebookRegistry>,

    /// Opened notebooks by name
    cache: RwLock<HashMap<StoreName, Arc<dyn Notebook>>>,
}

impl std::fmt::Debug for NotebookResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotebookResolver")
            .field("cache_size", &self.cache.try_read().map(|c| c.len()).ok())
            .finish_non_exhaustive()
    }
}

impl NotebookResolver {
    pub fn new(registry: Arc<dyn NotebookRegistry>) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Get the opened notebook for `name`, opening it on first use.
    ///
    /// Returns `Ok(None)` when no notebook is registered under that name.
    /// Misses are not cached, so a notebook registered later is found.
    ///
    /// Two concurrent misses for the same name may both open it; the later
    /// insert wins.
    pub async fn resolve(&self, name: &StoreName) -> Result<Option<Arc<dyn Notebook>>> {
        if let Some(notebook) = self.cache.read().await.get(name) {
            tracing::trace!(notebook = %name, "Cache hit");
            return Ok(Some(notebook.clone()));
        }

        let Some(notebook) = self.registry.open(name).await? else {
            tracing::debug!(notebook = %name, "Notebook is not registered");
            return Ok(None);
        };

        self.cache
            .write()
            .await
            .insert(name.clone(), notebook.clone());
        tracing::info!(notebook = %name, "Opened notebook");

        Ok(Some(notebook))
    }

    /// All registered notebooks, in registration order.
    pub async fn list_all(&self) -> Result<Vec<NotebookInfo>> {
        self.registry.list().await
    }

    /// Registered notebooks whose names contain every filter, ignoring case.
    pub async fn matching(&self, filters: &[String]) -> Result<Vec<StoreName>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .filter(|info| info.name.matches_all(filters))
            .map(|info| info.name)
            .collect())
    }

    /// Name of the notebook the registry marks as default.
    pub async fn registry_default(&self) -> Result<Option<StoreName>> {
        Ok(self
            .list_all()
            .await?
            .into_iter()
            .find(|info| info.is_default)
            .map(|info| info.name))
    }

    /// Choose the notebooks a query runs against.
    ///
    /// Filters select every notebook matching all of them. Without filters,
    /// `search_all` selects every notebook and otherwise only `default`.
    pub async fn select_targets(
        &self,
        filters: &[String],
        search_all: bool,
        default: Option<&StoreName>,
    ) -> Result<Vec<StoreName>> {
        if !filters.is_empty() {
            self.matching(filters).await
        } else if search_all {
            Ok(self
                .list_all()
                .await?
                .into_iter()
                .map(|info| info.name)
                .collect())
        } else {
            Ok(default.cloned().into_iter().collect())
        }
    }

    /// Drop a cached notebook so the next lookup opens it again.
    pub async fn evict(&self, name: &StoreName) -> bool {
        let removed = self.cache.write().await.remove(name).is_some();
        if removed {
            tracing::debug!(notebook = %name, "Evicted notebook");
        }
        removed
    }

    /// Check if a notebook has been opened.
    pub async fn is_cached(&self, name: &StoreName) -> bool {
        self.cache.read().await.contains_key(name)
    }
}
