//! Treeviz formatter
//!
//! One line per node, nesting shown as two spaces per level:
//!
//! ```text
//! ⧉ Document (3 header keys, 1 sections, 0 macros, 0 shorthands)
//!   § Intro (2 children)
//!     ↵ Hello world.
//!     ⏎
//! ```
//!
//! Node labels longer than 30 characters are truncated; the document line is always written in
//! full.

use super::registry::{FormatError, Formatter};
use crate::yinl::ast::{AstNode, Document, Section, Visitor};

const MAX_LABEL: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Section" => "§",
        "Text" => "↵",
        "Blank" => "⏎",
        _ => "○",
    }
}

struct TreevizVisitor {
    depth: usize,
    output: String,
}

impl TreevizVisitor {
    fn line(&mut self, node_type: &str, label: &str) {
        let indent = "  ".repeat(self.depth);
        let label = truncate(label, MAX_LABEL);
        if label.is_empty() {
            self.output
                .push_str(&format!("{indent}{}\n", get_icon(node_type)));
        } else {
            self.output
                .push_str(&format!("{indent}{} {label}\n", get_icon(node_type)));
        }
    }
}

impl Visitor for TreevizVisitor {
    fn visit_section(&mut self, section: &Section) {
        self.line(section.node_type(), &section.display_label());
        self.depth += 1;
    }

    fn leave_section(&mut self, _section: &Section) {
        self.depth -= 1;
    }

    fn visit_text(&mut self, text: &str) {
        self.line("Text", text);
    }

    fn visit_blank(&mut self) {
        self.line("Blank", "");
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut visitor = TreevizVisitor {
        depth: 0,
        output: String::new(),
    };
    visitor.output.push_str(&format!(
        "{} {}\n",
        get_icon(doc.node_type()),
        doc.display_label()
    ));
    visitor.depth = 1;
    doc.accept(&mut visitor);
    visitor.output
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn description(&self) -> &str {
        "Visual tree of the document sections"
    }
}
