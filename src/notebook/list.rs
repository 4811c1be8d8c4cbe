//! Parsing of Zim's `notebooks.list`.
//!
//! Two layouts exist in the wild. Current Zim writes numbered keys:
//!
//! ```text
//! [NotebookList]
//! Default=~/Notebooks/Notes
//! 1=~/Notebooks/Notes
//! 2=~/Notebooks/Work
//!
//! [Notebook 1]
//! uri=~/Notebooks/Notes
//! name=Notes
//! ```
//!
//! Older releases list bare `file://` URIs under `[NotebookList]`.

use crate::error::Result;
use crate::types::StoreName;
use anyhow::Context;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// A notebook registration read from `notebooks.list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookEntry {
    pub name: StoreName,
    /// Notebook root directory
    pub root: PathBuf,
    pub is_default: bool,
}

#[derive(Default)]
struct NotebookSection {
    uri: Option<String>,
    name: Option<String>,
}

/// Parse the contents of a `notebooks.list` file.
///
/// Entries keep their `[NotebookList]` order. When two entries share a name
/// the first one wins.
pub fn parse_notebook_list(content: &str) -> Vec<NotebookEntry> {
    let mut section = String::new();
    let mut default = None;
    let mut listed = Vec::new();
    let mut sections: Vec<NotebookSection> = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = header.trim().to_string();
            if section.starts_with("Notebook ") {
                sections.push(NotebookSection::default());
            }
            continue;
        }

        let pair = line.split_once('=').map(|(k, v)| (k.trim(), v.trim()));
        if section == "NotebookList" {
            match pair {
                Some(("Default", value)) => default = Some(value.to_string()),
                Some((key, value)) if key.chars().all(|c| c.is_ascii_digit()) => {
                    listed.push(value.to_string());
                }
                // Paths may contain `=`; keys never contain `/`
                Some((key, _)) if !key.contains('/') => {
                    tracing::debug!(key, "Ignoring unknown notebook list key");
                }
                _ => listed.push(line.to_string()),
            }
        } else if section.starts_with("Notebook ")
            && let Some(current) = sections.last_mut()
        {
            match pair {
                Some(("uri", value)) => current.uri = Some(value.to_string()),
                Some(("name", value)) => current.name = Some(value.to_string()),
                _ => {}
            }
        }
    }

    if listed.is_empty() {
        listed = sections.iter().filter_map(|s| s.uri.clone()).collect();
    }

    let default = default.filter(|d| !d.is_empty() && d != "None");
    let default_root = default.as_deref().map(uri_to_path);

    let mut entries: Vec<NotebookEntry> = Vec::new();
    for uri in listed {
        let root = uri_to_path(&uri);
        let name = sections
            .iter()
            .find(|s| s.uri.as_deref().map(uri_to_path).as_ref() == Some(&root))
            .and_then(|s| s.name.clone())
            .or_else(|| directory_name(&root))
            .unwrap_or_else(|| uri.clone());

        if entries.iter().any(|e| e.name.as_str() == name) {
            tracing::debug!(notebook = %name, uri = %uri, "Skipping duplicate notebook name");
            continue;
        }

        let is_default =
            default_root.as_ref() == Some(&root) || default.as_deref() == Some(name.as_str());
        entries.push(NotebookEntry {
            name: StoreName::new(name),
            root,
            is_default,
        });
    }

    entries
}

/// Read and parse a `notebooks.list` file. A missing file means no notebooks.
pub async fn read_notebook_list(path: &Path) -> Result<Vec<NotebookEntry>> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(parse_notebook_list(&content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No notebook list");
            Ok(Vec::new())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read notebook list {}", path.display()))
        }
    }
}

/// Convert a notebook URI (`file://`, `~/` or plain path) to a directory path.
pub fn uri_to_path(uri: &str) -> PathBuf {
    if let Some(rest) = uri.strip_prefix("file://") {
        let rest = rest.strip_prefix("localhost").unwrap_or(rest);
        let decoded = urlencoding::decode(rest).unwrap_or(Cow::Borrowed(rest));
        return PathBuf::from(decoded.as_ref());
    }
    PathBuf::from(expand_tilde(uri).as_ref())
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// Returns `Cow::Borrowed` if no expansion needed, `Cow::Owned` if expanded.
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

fn directory_name(root: &Path) -> Option<String> {
    root.file_name().map(|n| n.to_string_lossy().into_owned())
}
