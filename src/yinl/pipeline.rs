//! Document loading and processing API
//!
//! [`DocumentLoader`] is the entry point used by the CLI: it reads a source (file or stdin),
//! parses it and serializes it through the format registry. [`save_by_title`] persists rendered
//! markdown next to other documents, named after the document title.

pub mod loader;

pub use loader::{save_by_title, title_file_name, DocumentLoader, LoadError, STDIN_PATH};
