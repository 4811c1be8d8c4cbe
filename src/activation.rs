//! Opening results and the application itself.
//!
//! The shell has no way to show errors for these calls, so every failure is
//! logged and dropped here.

use crate::error::ProviderError;
use crate::notebook::{NotebookResolver, Viewer};
use crate::search::ResultId;
use crate::types::StoreName;
use std::sync::Arc;

/// Hands activated results to the viewer.
pub struct Dispatcher {
    resolver: Arc<NotebookResolver>,
    viewer: Arc<dyn Viewer>,
    default_notebook: Option<StoreName>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("default_notebook", &self.default_notebook)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(
        resolver: Arc<NotebookResolver>,
        viewer: Arc<dyn Viewer>,
        default_notebook: Option<StoreName>,
    ) -> Self {
        Self {
            resolver,
            viewer,
            default_notebook,
        }
    }

    /// Open the page behind `identifier`, or start creating it for placeholders.
    ///
    /// A page of a notebook that is no longer registered opens in the
    /// default notebook instead.
    pub async fn activate(&self, identifier: &str) {
        let id = match ResultId::decode(identifier, self.default_notebook.as_ref()) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Ignoring activation: {}", e);
                return;
            }
        };

        let Some(notebook) = self.resolve_or_default(&id.notebook).await else {
            return;
        };

        if let Err(e) = self.viewer.present(&notebook, &id.page, id.create).await {
            let error = ProviderError::ActivationFailure {
                notebook,
                page: id.page,
                reason: format!("{:#}", e),
            };
            tracing::warn!("{}", error);
        }
    }

    /// `name` if it is registered, otherwise the default notebook if that is.
    async fn resolve_or_default(&self, name: &StoreName) -> Option<StoreName> {
        match self.resolver.resolve(name).await {
            Ok(Some(_)) => return Some(name.clone()),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(notebook = %name, "Ignoring activation: {:#}", e);
                return None;
            }
        }

        let missing = ProviderError::StoreNotFound(name.clone());
        let Some(default) = self.default_notebook.as_ref().filter(|d| *d != name) else {
            tracing::warn!("Ignoring activation: {}", missing);
            return None;
        };

        match self.resolver.resolve(default).await {
            Ok(Some(_)) => {
                tracing::debug!(default = %default, "{}, using the default notebook", missing);
                Some(default.clone())
            }
            Ok(None) => {
                tracing::warn!(
                    "Ignoring activation: {}",
                    ProviderError::StoreNotFound(default.clone())
                );
                None
            }
            Err(e) => {
                tracing::warn!(notebook = %default, "Ignoring activation: {:#}", e);
                None
            }
        }
    }

    /// Bring up the application on the default notebook, seeded with the query.
    pub async fn launch<S: AsRef<str>>(&self, terms: &[S]) {
        let search = terms
            .iter()
            .map(|term| term.as_ref())
            .collect::<Vec<&str>>()
            .join(" ");

        if let Err(e) = self
            .viewer
            .present_default(self.default_notebook.as_ref(), &search)
            .await
        {
            tracing::warn!("Failed to launch viewer: {:#}", e);
        }
    }
}
