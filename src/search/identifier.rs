//! Result identifier encoding.
//!
//! Identifiers are compact JSON objects, e.g.
//! `{"create":false,"notebook":"Work","page":"Projects:todo"}`. JSON escaping
//! keeps page names containing `#`, `:`, quotes or control characters intact
//! and the token valid as a D-Bus string.

use crate::error::ProviderError;
use crate::types::{PageName, StoreName};
use serde::Deserialize;

/// Page name assumed when an identifier carries none.
const DEFAULT_PAGE: &str = "New Page";

/// Decoded form of a result identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultId {
    pub notebook: StoreName,
    pub page: PageName,
    /// Placeholder offering to create `page` rather than an existing page
    pub create: bool,
}

#[derive(Deserialize)]
struct RawResultId {
    notebook: Option<String>,
    page: Option<String>,
    #[serde(default)]
    create: bool,
}

impl ResultId {
    /// Identifier for an existing page.
    pub fn existing(notebook: StoreName, page: PageName) -> Self {
        Self {
            notebook,
            page,
            create: false,
        }
    }

    /// Identifier offering to create a page titled `text`.
    pub fn placeholder(notebook: StoreName, text: impl Into<String>) -> Self {
        Self {
            notebook,
            page: PageName::new(text),
            create: true,
        }
    }

    /// Encode into the opaque token handed to the shell.
    pub fn encode(&self) -> String {
        serde_json::json!({
            "notebook": self.notebook.as_str(),
            "page": self.page.as_str(),
            "create": self.create,
        })
        .to_string()
    }

    /// Decode a token produced by [`ResultId::encode`].
    ///
    /// A missing `create` field means `false`; a missing `notebook` field means
    /// `fallback_notebook`.
    pub fn decode(
        identifier: &str,
        fallback_notebook: Option<&StoreName>,
    ) -> Result<Self, ProviderError> {
        let malformed = |reason: String| ProviderError::MalformedIdentifier {
            identifier: identifier.to_string(),
            reason,
        };

        let raw: RawResultId =
            serde_json::from_str(identifier).map_err(|e| malformed(e.to_string()))?;

        let notebook = match (raw.notebook, fallback_notebook) {
            (Some(notebook), _) => StoreName::new(notebook),
            (None, Some(fallback)) => fallback.clone(),
            (None, None) => return Err(malformed("no notebook and no default".to_string())),
        };

        Ok(Self {
            notebook,
            page: PageName::new(raw.page.unwrap_or_else(|| DEFAULT_PAGE.to_string())),
            create: raw.create,
        })
    }
}
