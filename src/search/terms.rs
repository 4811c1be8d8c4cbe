//! Query term classification.
//!
//! The shell hands over the query already split into terms. Terms starting
//! with the filter marker (`#` by default) select notebooks by name; every
//! other term is matched against page content.

/// Terms of one query, split by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedTerms {
    /// Marker-stripped notebook filters, in input order
    pub notebook_filters: Vec<String>,
    /// Content terms, in input order
    pub content_terms: Vec<String>,
}

impl ClassifiedTerms {
    /// Content terms joined with single spaces, as typed.
    pub fn content_text(&self) -> String {
        self.content_terms.join(" ")
    }

    /// True when there is nothing to search page content for.
    pub fn content_is_blank(&self) -> bool {
        self.content_terms.iter().all(|term| term.trim().is_empty())
    }
}

/// Split raw terms into notebook filters and content terms.
///
/// A bare marker (nothing after it) is dropped. Case is preserved.
pub fn classify<S: AsRef<str>>(terms: &[S], marker: &str) -> ClassifiedTerms {
    let mut classified = ClassifiedTerms::default();
    for term in terms {
        let term = term.as_ref();
        match term.strip_prefix(marker) {
            Some("") => {}
            Some(filter) => classified.notebook_filters.push(filter.to_string()),
            None => classified.content_terms.push(term.to_string()),
        }
    }
    classified
}
