//! Section element
//!
//! A section is a named block opened by a `section <name>:` line. Its children are either nested
//! sections, text lines, or blank-line markers, in source order.
//!
//! Ownership flows strictly from parent to child: roots are owned by the document, every other
//! section by exactly one parent. There are no back references, so the tree has no cycles.
//!
//! Invariants:
//! - `indent` is the normalized level (raw width / indentation unit), not a column count.
//! - A section's `indent` is strictly less than the `indent` of every descendant section.

use super::super::traits::{visit_children, AstNode, Visitor};
use serde::Serialize;

/// A child of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ChildNode {
    Section(Section),
    Text(String),
    /// An empty source line, kept so paragraph breaks survive rendering.
    Blank,
}

impl ChildNode {
    pub fn as_section(&self) -> Option<&Section> {
        match self {
            ChildNode::Section(section) => Some(section),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ChildNode::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, ChildNode::Blank)
    }
}

impl AstNode for ChildNode {
    fn node_type(&self) -> &'static str {
        match self {
            ChildNode::Section(section) => section.node_type(),
            ChildNode::Text(_) => "Text",
            ChildNode::Blank => "Blank",
        }
    }

    fn display_label(&self) -> String {
        match self {
            ChildNode::Section(section) => section.display_label(),
            ChildNode::Text(text) => text.clone(),
            ChildNode::Blank => String::new(),
        }
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            ChildNode::Section(section) => section.accept(visitor),
            ChildNode::Text(text) => visitor.visit_text(text),
            ChildNode::Blank => visitor.visit_blank(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub indent: usize,
    /// Index among siblings (roots are numbered among roots).
    pub position: usize,
    /// 1-based source line of the `section` line.
    pub line: usize,
    pub children: Vec<ChildNode>,
}

impl Section {
    pub fn new(name: impl Into<String>, indent: usize, position: usize, line: usize) -> Self {
        Self {
            name: name.into(),
            indent,
            position,
            line,
            children: Vec::new(),
        }
    }

    pub fn iter_sections(&self) -> impl Iterator<Item = &Section> {
        self.children.iter().filter_map(|child| child.as_section())
    }

    pub fn iter_text(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(|child| child.as_text())
    }

    /// Number of sections directly nested in this one.
    pub fn section_count(&self) -> usize {
        self.iter_sections().count()
    }

    /// Next free sibling position for a section appended to `children`.
    pub(crate) fn next_position(&self) -> usize {
        self.section_count()
    }

    /// Depth-first search for a section named `name`, including this one.
    pub fn find(&self, name: &str) -> Option<&Section> {
        if self.name == name {
            return Some(self);
        }
        self.iter_sections().find_map(|child| child.find(name))
    }
}

impl AstNode for Section {
    fn node_type(&self) -> &'static str {
        "Section"
    }

    fn display_label(&self) -> String {
        format!("{} ({} children)", self.name, self.children.len())
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_section(self);
        visit_children(visitor, &self.children);
        visitor.leave_section(self);
    }
}
