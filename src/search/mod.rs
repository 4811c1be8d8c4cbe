//! Search over notebooks: term classification, result identifiers, query
//! orchestration, and result metadata.

pub mod identifier;
pub mod metadata;
pub mod orchestrator;
pub mod terms;

pub use identifier::ResultId;
pub use metadata::{NEW_PAGE_ICON, PAGE_ICON, result_meta, result_metas};
pub use orchestrator::{Orchestrator, SearchSettings};
pub use terms::{ClassifiedTerms, classify};
