//! Seams to the notebook application: registry, opened notebooks, viewer.

use crate::error::Result;
use crate::types::{NotebookInfo, PageName, StoreName};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of registered notebooks.
#[async_trait]
pub trait NotebookRegistry: Send + Sync {
    /// All registered notebooks, in registration order.
    async fn list(&self) -> Result<Vec<NotebookInfo>>;

    /// Open a notebook by name. `Ok(None)` means no such registration.
    async fn open(&self, name: &StoreName) -> Result<Option<Arc<dyn Notebook>>>;
}

/// An opened, queryable notebook.
#[async_trait]
pub trait Notebook: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &StoreName;

    /// Full-text search, pages in relevance order.
    async fn search(&self, query: &str) -> Result<Vec<PageName>>;

    /// Every page name in the notebook.
    async fn walk(&self) -> Result<Vec<PageName>>;
}

/// Presents notebooks and pages to the user.
#[async_trait]
pub trait Viewer: Send + Sync {
    /// Show `page`, creating it first when `create` is set.
    async fn present(&self, notebook: &StoreName, page: &PageName, create: bool) -> Result<()>;

    /// Bring up the application, seeded with `search` when it supports that.
    async fn present_default(&self, notebook: Option<&StoreName>, search: &str) -> Result<()>;
}
