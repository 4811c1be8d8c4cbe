//! GNOME Shell search provider for Zim notebooks.
//!
//! Shell queries are split into notebook filters and content terms, run
//! against the selected notebooks, and answered with opaque identifiers the
//! shell later asks metadata for or activates.

pub mod activation;
pub mod cli;
pub mod config;
pub mod error;
pub mod notebook;
pub mod provider;
pub mod search;
pub mod server;
pub mod tracing;
pub mod types;

pub use error::{ProviderError, Result};
pub use notebook::{Notebook, NotebookRegistry, NotebookResolver, Viewer};
pub use provider::SearchProvider;
pub use search::{ResultId, SearchSettings};
pub use types::{NotebookInfo, PageName, ResultMeta, StoreName};
