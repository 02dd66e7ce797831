//! Output formats for parsed documents
//!
//! - `markdown`: the rendered document, with macros and shorthands expanded
//! - `treeviz`: one line per node, for inspecting the section tree
//! - `json` and `yaml`: the full document structure via serde

pub mod json;
pub mod markdown;
pub mod registry;
pub mod treeviz;
pub mod yaml;

pub use json::JsonFormatter;
pub use markdown::{render, to_markdown, MarkdownFormatter, RenderOptions, Rendered};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
pub use yaml::YamlFormatter;
