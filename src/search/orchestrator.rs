//! Query execution across notebooks.
//!
//! An initial search fans out to every target notebook concurrently and
//! aggregates pages in notebook enumeration order. Refinement narrows a
//! previous result set without touching any notebook. Both fall back to
//! "new page" placeholders when nothing matches.

use super::identifier::ResultId;
use super::terms::{ClassifiedTerms, classify};
use crate::config::Config;
use crate::error::ProviderError;
use crate::notebook::NotebookResolver;
use crate::types::{StoreName, contains_all};
use futures::future::join_all;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Search behavior fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Search every registered notebook when no filter is given
    pub search_all: bool,
    /// Match page basenames instead of running full-text search
    pub names_only: bool,
    /// Prefix marking a notebook filter term
    pub filter_marker: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SearchSettings {
    fn from(config: &Config) -> Self {
        Self {
            search_all: config.search_all,
            names_only: config.names_only,
            filter_marker: config.filter_marker.clone(),
        }
    }
}

/// Runs initial searches and refinements.
#[derive(Debug)]
pub struct Orchestrator {
    resolver: Arc<NotebookResolver>,
    settings: SearchSettings,
    default_notebook: Option<StoreName>,
}

impl Orchestrator {
    pub fn new(
        resolver: Arc<NotebookResolver>,
        settings: SearchSettings,
        default_notebook: Option<StoreName>,
    ) -> Self {
        Self {
            resolver,
            settings,
            default_notebook,
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn default_notebook(&self) -> Option<&StoreName> {
        self.default_notebook.as_ref()
    }

    pub fn classify<S: AsRef<str>>(&self, terms: &[S]) -> ClassifiedTerms {
        classify(terms, &self.settings.filter_marker)
    }

    /// Search the target notebooks for `terms`.
    ///
    /// Returns an empty set if `cancel` fires before the notebooks answer.
    pub async fn initial<S: AsRef<str>>(
        &self,
        terms: &[S],
        cancel: &CancellationToken,
    ) -> Vec<String> {
        let classified = self.classify(terms);

        let targets = match self
            .resolver
            .select_targets(
                &classified.notebook_filters,
                self.settings.search_all,
                self.default_notebook.as_ref(),
            )
            .await
        {
            Ok(targets) => targets,
            Err(e) => {
                tracing::warn!("Failed to list notebooks: {:#}", e);
                Vec::new()
            }
        };

        let mut results = Vec::new();
        if classified.content_is_blank() {
            tracing::debug!("Blank content query, skipping notebook search");
        } else {
            let searches = targets
                .iter()
                .map(|name| self.search_notebook(name, &classified));

            let found = tokio::select! {
                () = cancel.cancelled() => {
                    tracing::debug!("Search superseded by a newer query");
                    return Vec::new();
                }
                found = join_all(searches) => found,
            };
            results = found.into_iter().flatten().collect();
        }

        if results.is_empty() {
            results = self.fallback(&classified).await;
        }

        tracing::debug!(
            targets = targets.len(),
            results = results.len(),
            "Initial search finished"
        );
        results.iter().map(ResultId::encode).collect()
    }

    /// Narrow `previous` to the identifiers still matching `terms`.
    ///
    /// Placeholders are not filtered; the fallback regenerates them from the
    /// new terms when nothing else survives.
    pub async fn refine<S: AsRef<str>>(&self, previous: &[String], terms: &[S]) -> Vec<String> {
        let classified = self.classify(terms);

        let mut kept = Vec::new();
        for identifier in previous {
            let id = match ResultId::decode(identifier, self.default_notebook.as_ref()) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("Dropping previous result: {}", e);
                    continue;
                }
            };
            if id.create {
                continue;
            }
            if id.notebook.matches_all(&classified.notebook_filters)
                && id.page.contains_all(&classified.content_terms)
            {
                kept.push(identifier.clone());
            }
        }

        if kept.is_empty() {
            kept = self
                .fallback(&classified)
                .await
                .iter()
                .map(ResultId::encode)
                .collect();
        }

        tracing::debug!(
            previous = previous.len(),
            kept = kept.len(),
            "Refined search"
        );
        kept
    }

    /// Pages of one notebook matching the content terms.
    ///
    /// Any failure is logged and yields no pages, leaving other notebooks unaffected.
    async fn search_notebook(&self, name: &StoreName, terms: &ClassifiedTerms) -> Vec<ResultId> {
        let notebook = match self.resolver.resolve(name).await {
            Ok(Some(notebook)) => notebook,
            Ok(None) => {
                tracing::debug!("Skipping target: {}", ProviderError::StoreNotFound(name.clone()));
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(notebook = %name, "Failed to open notebook: {:#}", e);
                return Vec::new();
            }
        };

        let pages = if self.settings.names_only {
            notebook.walk().await.map(|pages| {
                pages
                    .into_iter()
                    .filter(|page| contains_all(page.basename(), &terms.content_terms))
                    .collect::<Vec<_>>()
            })
        } else {
            notebook.search(&terms.content_text()).await
        };

        match pages {
            Ok(pages) => {
                tracing::debug!(notebook = %name, count = pages.len(), "Searched notebook");
                pages
                    .into_iter()
                    .map(|page| ResultId::existing(name.clone(), page))
                    .collect()
            }
            Err(e) => {
                let error = ProviderError::StoreSearchFailure {
                    notebook: name.clone(),
                    reason: format!("{:#}", e),
                };
                tracing::warn!("{}", error);
                Vec::new()
            }
        }
    }

    /// Placeholders offering to create a page named after the content terms.
    ///
    /// With filters: one per registered notebook matching all of them.
    /// Without: one for the default notebook, if there is one.
    async fn fallback(&self, terms: &ClassifiedTerms) -> Vec<ResultId> {
        let text = terms.content_text();

        if terms.notebook_filters.is_empty() {
            return self
                .default_notebook
                .iter()
                .map(|name| ResultId::placeholder(name.clone(), text.clone()))
                .collect();
        }

        match self.resolver.matching(&terms.notebook_filters).await {
            Ok(names) => names
                .into_iter()
                .map(|name| ResultId::placeholder(name, text.clone()))
                .collect(),
            Err(e) => {
                tracing::warn!("Failed to list notebooks for placeholders: {:#}", e);
                Vec::new()
            }
        }
    }
}
