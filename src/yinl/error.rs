//! Error and warning types for the yinl pipeline
//!
//! Parse-time failures ([`StructuralError`], [`MalformedBlockError`]) abort the parse and are
//! surfaced through [`ParseError`]. Render-time failures ([`MacroError`]) are collected per call
//! site and never stop the render. [`ParseWarning`]s are recorded on the document.

use serde::Serialize;
use thiserror::Error;

/// A required document region could not be located.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("missing header")]
    MissingHeader,
    #[error("missing footer")]
    MissingFooter,
    #[error("footer marker appears before the header marker")]
    FooterBeforeHeader,
}

/// A key-value block (or one of the footer sub-blocks) is not well formed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedBlockError {
    #[error("block does not start with the '{expected}' marker")]
    MissingMarker { expected: String },

    #[error("{block}: line {line}: value line appears before any key")]
    ValueBeforeKey { block: String, line: usize },

    #[error("{block}: line {line}: key has no name")]
    EmptyKey { block: String, line: usize },

    #[error("macros: line {line}: expected a macro header 'name: (params)', found '{text}'")]
    InvalidMacroHeader { line: usize, text: String },

    #[error("macro '{macro_name}': invalid or duplicate parameter '{parameter}'")]
    InvalidParameter {
        macro_name: String,
        parameter: String,
    },

    #[error("shorthands: line {line}: expected 'token: replacement', found '{text}'")]
    InvalidShorthand { line: usize, text: String },
}

/// Any failure that aborts [`parse_document`](crate::yinl::parsing::parse_document).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),
    #[error("malformed block: {0}")]
    MalformedBlock(#[from] MalformedBlockError),
}

/// A macro call site that could not be expanded.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum MacroError {
    #[error("section '{section}': unknown macro '{name}'")]
    UnknownMacro { name: String, section: String },

    #[error("section '{section}': macro '{name}' expects {expected} argument(s), found {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        section: String,
    },
}

/// Where an indentation unit was inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndentContext {
    Header,
    Footer,
    Macros,
    Sections,
}

impl std::fmt::Display for IndentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IndentContext::Header => "header",
            IndentContext::Footer => "footer",
            IndentContext::Macros => "macros",
            IndentContext::Sections => "sections",
        };
        f.write_str(name)
    }
}

/// Non-fatal findings recorded while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ParseWarning {
    #[error("{context}: indentation widths {widths:?} are not uniform multiples, using unit {unit}")]
    AmbiguousIndentation {
        context: IndentContext,
        unit: usize,
        widths: Vec<usize>,
    },

    #[error("line {line}: text outside of any section was dropped: '{text}'")]
    OrphanLine { line: usize, text: String },
}
