//! Document element
//!
//! The document aggregates everything a parse produces: the header and footer blocks, the
//! compiled macro and shorthand tables, the section forest, and any warnings. It is built once by
//! [`parse_document`](crate::yinl::parsing::parse_document) and only read afterwards.

use super::super::traits::{AstNode, Visitor};
use super::block::Block;
use super::macros::MacroTable;
use super::section::Section;
use super::shorthand::ShorthandTable;
use crate::yinl::error::ParseWarning;
use crate::yinl::lexing::unescape_colons;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub header: Block,
    pub footer: Block,
    pub macros: MacroTable,
    pub shorthands: ShorthandTable,
    pub sections: Vec<Section>,
    pub warnings: Vec<ParseWarning>,
}

impl Document {
    fn header_field(&self, key: &str) -> Option<String> {
        self.header
            .joined(key)
            .filter(|value| !value.is_empty())
            .map(|value| unescape_colons(&value))
    }

    pub fn title(&self) -> Option<String> {
        self.header_field("title")
    }

    pub fn date(&self) -> Option<String> {
        self.header_field("date")
    }

    pub fn institute(&self) -> Option<String> {
        self.header_field("institute")
    }

    /// Citation style named in the header.
    pub fn citation_style(&self) -> Option<String> {
        self.header_field("citations")
    }

    /// Authors from `authors` (preferred) or `author`, split on commas.
    pub fn authors(&self) -> Vec<String> {
        let lines = match self.header.get("authors") {
            Some(lines) => lines,
            None => self.header.lines("author"),
        };
        lines
            .iter()
            .flat_map(|line| line.split(','))
            .map(|author| unescape_colons(author.trim()))
            .filter(|author| !author.is_empty())
            .collect()
    }

    /// Non-empty lines of the footer citation list.
    pub fn citations(&self) -> Vec<&str> {
        self.footer
            .lines("citations")
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// All sections, depth first, parents before children.
    pub fn iter_sections(&self) -> impl Iterator<Item = &Section> {
        let mut stack: Vec<&Section> = self.sections.iter().rev().collect();
        std::iter::from_fn(move || {
            let section = stack.pop()?;
            stack.extend(section.iter_sections().collect::<Vec<_>>().into_iter().rev());
            Some(section)
        })
    }

    pub fn find_section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find_map(|root| root.find(name))
    }
}

impl AstNode for Document {
    fn node_type(&self) -> &'static str {
        "Document"
    }

    fn display_label(&self) -> String {
        format!(
            "Document ({} header keys, {} sections, {} macros, {} shorthands)",
            self.header.len(),
            self.sections.len(),
            self.macros.len(),
            self.shorthands.len()
        )
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        for section in &self.sections {
            section.accept(visitor);
        }
    }
}
