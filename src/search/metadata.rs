//! Display metadata for result identifiers.

use super::identifier::ResultId;
use super::orchestrator::SearchSettings;
use crate::types::{ResultMeta, StoreName};

/// Icon for existing pages.
pub const PAGE_ICON: &str = "text-x-generic";

/// Icon for "create this page" placeholders.
pub const NEW_PAGE_ICON: &str = "text-x-generic-template";

/// Metadata for each identifier, in order.
///
/// Undecodable identifiers get a bare entry showing the raw identifier
/// rather than failing the batch.
pub fn result_metas(
    identifiers: &[String],
    settings: &SearchSettings,
    fallback_notebook: Option<&StoreName>,
) -> Vec<ResultMeta> {
    identifiers
        .iter()
        .map(|identifier| result_meta(identifier, settings, fallback_notebook))
        .collect()
}

pub fn result_meta(
    identifier: &str,
    settings: &SearchSettings,
    fallback_notebook: Option<&StoreName>,
) -> ResultMeta {
    let id = match ResultId::decode(identifier, fallback_notebook) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Describing undecodable result: {}", e);
            return ResultMeta {
                id: identifier.to_string(),
                name: identifier.to_string(),
                gicon: PAGE_ICON.to_string(),
                description: String::new(),
            };
        }
    };

    let (name, gicon) = if id.create {
        (format!("New page: “{}”", id.page), NEW_PAGE_ICON)
    } else {
        (id.page.basename().to_string(), PAGE_ICON)
    };

    ResultMeta {
        id: identifier.to_string(),
        name,
        gicon: gicon.to_string(),
        description: describe(&id, settings),
    }
}

/// Parent path of the page, prefixed with `(#Notebook)` when results can
/// come from several notebooks.
fn describe(id: &ResultId, settings: &SearchSettings) -> String {
    let path = if id.create {
        String::new()
    } else {
        id.page.parent_path()
    };

    if !settings.search_all {
        return path;
    }

    let notebook = format!("({}{})", settings.filter_marker, id.notebook);
    if path.is_empty() {
        notebook
    } else {
        format!("{} {}", notebook, path)
    }
}
