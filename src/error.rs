//! Error handling types and utilities.

use crate::types::{PageName, StoreName};

/// A specialized Result type for collaborator and I/O code.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Failures the provider recognizes by kind.
///
/// None of these are fatal: each is logged and degrades the affected call to
/// an empty or partial answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// A notebook name has no registration.
    #[error("notebook '{0}' is not registered")]
    StoreNotFound(StoreName),
    /// A result identifier could not be decoded.
    #[error("malformed result identifier '{identifier}': {reason}")]
    MalformedIdentifier { identifier: String, reason: String },
    /// Searching one notebook failed.
    #[error("search in notebook '{notebook}' failed: {reason}")]
    StoreSearchFailure { notebook: StoreName, reason: String },
    /// The viewer could not present a page.
    #[error("failed to present page '{page}' of notebook '{notebook}': {reason}")]
    ActivationFailure {
        notebook: StoreName,
        page: PageName,
        reason: String,
    },
}
