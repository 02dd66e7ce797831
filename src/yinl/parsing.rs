//! Parsing pipeline
//!
//! [`parse_document`] runs the stages in their fixed dependency order:
//!
//! 1. locate the header, body and footer regions
//! 2. parse the header block
//! 3. parse the footer block, then compile its `macros` and `shorthands` values
//! 4. build the section tree from the body
//!
//! The first structural or block failure aborts the parse; no partial document is returned.

pub mod blocks;
pub mod macros;
pub mod sections;
pub mod shorthands;

pub use blocks::{parse_block, DuplicatePolicy};
pub use macros::{compile_macros, compile_template};
pub use sections::build_sections;
pub use shorthands::build_shorthands;

use crate::yinl::ast::Document;
use crate::yinl::error::{ParseError, ParseWarning};
use crate::yinl::lexing::{locate, FOOTER_MARKER, HEADER_MARKER};

/// Knobs for the indentation-sensitive scanners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Unit used when every observed indentation width is zero.
    pub default_indent_unit: usize,
    /// Columns counted for a leading tab.
    pub tab_width: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_indent_unit: 4,
            tab_width: 4,
        }
    }
}

pub(crate) fn record_warning(warnings: &mut Vec<ParseWarning>, warning: ParseWarning) {
    log::warn!("{warning}");
    warnings.push(warning);
}

/// Parse `text` with the default options.
pub fn parse_document(text: &str) -> Result<Document, ParseError> {
    parse_document_with(text, &ParseOptions::default())
}

pub fn parse_document_with(text: &str, options: &ParseOptions) -> Result<Document, ParseError> {
    let regions = locate(text)?;
    let mut warnings = Vec::new();

    let header = parse_block(
        regions.header.slice(text),
        HEADER_MARKER,
        regions.header.first_line,
        DuplicatePolicy::KeepFirst,
        options,
        &mut warnings,
    )?;

    let footer = parse_block(
        regions.footer.slice(text),
        FOOTER_MARKER,
        regions.footer.first_line,
        DuplicatePolicy::Overwrite,
        options,
        &mut warnings,
    )?;
    let macros = compile_macros(
        footer.lines("macros"),
        footer.line_numbers("macros"),
        options,
        &mut warnings,
    )?;
    let shorthands = build_shorthands(
        footer.lines("shorthands"),
        footer.line_numbers("shorthands"),
    )?;

    let sections = build_sections(
        regions.body.slice(text),
        regions.body.first_line,
        options,
        &mut warnings,
    );
    log::debug!(
        "parsed document: {} header keys, {} footer keys, {} root sections",
        header.len(),
        footer.len(),
        sections.len()
    );

    Ok(Document {
        header,
        footer,
        macros,
        shorthands,
        sections,
        warnings,
    })
}
