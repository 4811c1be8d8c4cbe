//! Notebook access: collaborator traits, the opened-notebook cache, and the
//! Zim implementations.

pub mod list;
pub mod resolver;
pub mod traits;
pub mod zim;

pub use list::{NotebookEntry, parse_notebook_list};
pub use resolver::NotebookResolver;
pub use traits::{Notebook, NotebookRegistry, Viewer};
pub use zim::{ZimNotebook, ZimRegistry, ZimViewer};
