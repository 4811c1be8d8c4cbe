//! Shared domain types: notebook and page names, registry entries, result metadata.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Case-insensitive check that `haystack` contains every entry of `needles`.
///
/// An empty needle list matches everything.
pub fn contains_all<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .all(|needle| haystack.contains(&needle.as_ref().to_lowercase()))
}

/// Name of a Zim notebook as registered in `notebooks.list`.
///
/// Lookups are case-sensitive; filter matching is not.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreName(String);

impl StoreName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the name contains every filter, ignoring case.
    pub fn matches_all<S: AsRef<str>>(&self, filters: &[S]) -> bool {
        contains_all(&self.0, filters)
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StoreName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StoreName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StoreName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for StoreName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Hierarchical page name inside a notebook, e.g. `Projects:Garden:Beans`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageName(String);

impl PageName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, splitting on both `:` and `/`.
    pub fn segments(&self) -> Vec<&str> {
        self.0.split([':', '/']).collect()
    }

    /// Last path segment (the page's short title).
    pub fn basename(&self) -> &str {
        self.0.rsplit([':', '/']).next().unwrap_or(&self.0)
    }

    /// Everything above the basename, joined with `/`. Empty for top-level pages.
    pub fn parent_path(&self) -> String {
        let segments = self.segments();
        segments[..segments.len().saturating_sub(1)].join("/")
    }

    /// True when the full page name contains every term, ignoring case.
    pub fn contains_all<S: AsRef<str>>(&self, terms: &[S]) -> bool {
        contains_all(&self.0, terms)
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One notebook known to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookInfo {
    pub name: StoreName,
    /// Marked as the default notebook by the registry
    pub is_default: bool,
}

impl NotebookInfo {
    pub fn new(name: impl Into<StoreName>, is_default: bool) -> Self {
        Self {
            name: name.into(),
            is_default,
        }
    }
}

/// Display metadata for one result, keyed like the shell's meta dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMeta {
    /// The identifier this meta describes, verbatim
    pub id: String,
    /// Title shown in the result list
    pub name: String,
    /// Themed icon name
    pub gicon: String,
    pub description: String,
}
