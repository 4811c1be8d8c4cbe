//! The search provider: the five shell calls on top of the orchestrator,
//! metadata and activation.

use crate::activation::Dispatcher;
use crate::error::Result;
use crate::notebook::{NotebookRegistry, NotebookResolver, Viewer};
use crate::search::{Orchestrator, SearchSettings, result_metas};
use crate::types::{ResultMeta, StoreName};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Shell-facing search provider.
///
/// Owns the notebook cache for the lifetime of the process. Every call
/// answers with an empty or partial result instead of an error.
#[derive(Debug)]
pub struct SearchProvider {
    resolver: Arc<NotebookResolver>,
    orchestrator: Orchestrator,
    dispatcher: Dispatcher,

    /// Cancels the running initial search when a newer one starts
    in_flight: Mutex<Option<CancellationToken>>,
}

impl SearchProvider {
    pub fn new(
        registry: Arc<dyn NotebookRegistry>,
        viewer: Arc<dyn Viewer>,
        settings: SearchSettings,
        default_notebook: Option<StoreName>,
    ) -> Self {
        let resolver = Arc::new(NotebookResolver::new(registry));
        Self::with_resolver(resolver, viewer, settings, default_notebook)
    }

    /// Build a provider, taking the default notebook from `explicit` or else
    /// from the registry.
    ///
    /// An explicit name that is not registered is kept as given; queries then
    /// fall back to placeholders for it and activation reports it missing.
    pub async fn with_default(
        registry: Arc<dyn NotebookRegistry>,
        viewer: Arc<dyn Viewer>,
        settings: SearchSettings,
        explicit: Option<&str>,
    ) -> Result<Self> {
        let resolver = Arc::new(NotebookResolver::new(registry));
        let default_notebook = match explicit {
            Some(name) => Some(StoreName::from(name)),
            None => resolver.registry_default().await?,
        };

        match &default_notebook {
            Some(name) => tracing::info!(notebook = %name, "Default notebook"),
            None => tracing::warn!("No default notebook configured or registered"),
        }

        Ok(Self::with_resolver(resolver, viewer, settings, default_notebook))
    }

    fn with_resolver(
        resolver: Arc<NotebookResolver>,
        viewer: Arc<dyn Viewer>,
        settings: SearchSettings,
        default_notebook: Option<StoreName>,
    ) -> Self {
        Self {
            orchestrator: Orchestrator::new(resolver.clone(), settings, default_notebook.clone()),
            dispatcher: Dispatcher::new(resolver.clone(), viewer, default_notebook),
            resolver,
            in_flight: Mutex::new(None),
        }
    }

    pub fn resolver(&self) -> &Arc<NotebookResolver> {
        &self.resolver
    }

    pub fn settings(&self) -> &SearchSettings {
        self.orchestrator.settings()
    }

    pub fn default_notebook(&self) -> Option<&StoreName> {
        self.orchestrator.default_notebook()
    }

    /// `GetInitialResultSet`: search notebooks for `terms`.
    ///
    /// Starting a search cancels the previous one if it is still running;
    /// the cancelled call answers with an empty set.
    pub async fn get_initial_result_set<S: AsRef<str>>(&self, terms: &[S]) -> Vec<String> {
        let token = CancellationToken::new();
        if let Some(previous) = self.in_flight.lock().await.replace(token.clone()) {
            previous.cancel();
        }

        self.orchestrator.initial(terms, &token).await
    }

    /// `GetSubsearchResultSet`: narrow previous results to `terms`.
    pub async fn get_subsearch_result_set<S: AsRef<str>>(
        &self,
        previous: &[String],
        terms: &[S],
    ) -> Vec<String> {
        self.orchestrator.refine(previous, terms).await
    }

    /// `GetResultMetas`: display metadata for each identifier.
    pub fn get_result_metas(&self, identifiers: &[String]) -> Vec<ResultMeta> {
        result_metas(
            identifiers,
            self.orchestrator.settings(),
            self.orchestrator.default_notebook(),
        )
    }

    /// `ActivateResult`: open the chosen page.
    pub async fn activate_result<S: AsRef<str>>(
        &self,
        identifier: &str,
        terms: &[S],
        timestamp: u32,
    ) {
        tracing::debug!(terms = terms.len(), timestamp, "Activating result");
        self.dispatcher.activate(identifier).await;
    }

    /// `LaunchSearch`: open the application with the query.
    pub async fn launch_search<S: AsRef<str>>(&self, terms: &[S], timestamp: u32) {
        tracing::debug!(timestamp, "Launching search");
        self.dispatcher.launch(terms).await;
    }
}
