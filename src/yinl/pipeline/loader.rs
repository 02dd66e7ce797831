//! Document loading and processing
//!
//! - String-based methods are the core functionality (process source text)
//! - File-based methods are thin wrappers (read the file, then call the string method)
//!
//! ```rust,ignore
//! use yinl::yinl::pipeline::DocumentLoader;
//!
//! let loader = DocumentLoader::new();
//! let doc = loader.parse(source)?;
//! let markdown = loader.load_and_render("paper.yi", "markdown")?;
//! ```

use crate::yinl::ast::Document;
use crate::yinl::config::YinlConfig;
use crate::yinl::error::ParseError;
use crate::yinl::formats::{render, FormatError, FormatRegistry, RenderOptions, Rendered};
use crate::yinl::parsing::{parse_document_with, ParseOptions};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Path that selects standard input.
pub const STDIN_PATH: &str = "-";

const UNTITLED_FILE_NAME: &str = "document";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{path}: {message}")]
    Io { path: String, message: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LoadError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        LoadError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

pub struct DocumentLoader {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    registry: FormatRegistry,
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default(), RenderOptions::default())
    }

    pub fn with_options(parse_options: ParseOptions, render_options: RenderOptions) -> Self {
        Self {
            registry: FormatRegistry::with_options(render_options.clone()),
            parse_options,
            render_options,
        }
    }

    pub fn from_config(config: &YinlConfig) -> Self {
        Self::with_options(config.into(), config.into())
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    // ===== STRING-BASED PROCESSING =====

    pub fn parse(&self, source: &str) -> Result<Document, LoadError> {
        let doc = parse_document_with(source, &self.parse_options)?;
        Ok(doc)
    }

    /// Parse `source` and serialize it with the format named `format`.
    pub fn render_source(&self, source: &str, format: &str) -> Result<String, LoadError> {
        if !self.registry.has(format) {
            return Err(FormatError::FormatNotFound(format.to_string()).into());
        }
        let doc = self.parse(source)?;
        Ok(self.registry.serialize(&doc, format)?)
    }

    /// Markdown for `doc` together with the unresolved macro calls.
    pub fn render_markdown(&self, doc: &Document) -> Rendered {
        render(doc, &self.render_options)
    }

    // ===== FILE-BASED PROCESSING =====

    /// Read `path`, or standard input when `path` is [`STDIN_PATH`].
    pub fn read_source(&self, path: impl AsRef<Path>) -> Result<String, LoadError> {
        let path = path.as_ref();
        if path == Path::new(STDIN_PATH) {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|err| LoadError::io(path, err))?;
            return Ok(source);
        }
        log::debug!("reading {}", path.display());
        fs::read_to_string(path).map_err(|err| LoadError::io(path, err))
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<Document, LoadError> {
        let source = self.read_source(path)?;
        self.parse(&source)
    }

    pub fn load_and_render(&self, path: impl AsRef<Path>, format: &str) -> Result<String, LoadError> {
        let source = self.read_source(path)?;
        self.render_source(&source, format)
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// File name derived from the document title: `<title>.<extension>`, or `document.<extension>`
/// when untitled.
///
/// Path separators and other characters that are unsafe in file names become `_`.
pub fn title_file_name(doc: &Document, extension: &str) -> String {
    let stem: String = doc
        .title()
        .unwrap_or_default()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim().trim_start_matches('.');
    let stem = if stem.is_empty() {
        UNTITLED_FILE_NAME
    } else {
        stem
    };
    format!("{stem}.{extension}")
}

/// Write `contents` into `dir` under [`title_file_name`]. Returns the written path.
pub fn save_by_title(
    doc: &Document,
    contents: &str,
    dir: impl AsRef<Path>,
    extension: &str,
) -> Result<PathBuf, LoadError> {
    let path = dir.as_ref().join(title_file_name(doc, extension));
    fs::write(&path, contents).map_err(|err| LoadError::io(&path, err))?;
    log::info!("saved {}", path.display());
    Ok(path)
}
