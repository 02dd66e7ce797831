//! AST traits - Common interfaces for uniform node access

use super::elements::{ChildNode, Section};

/// Visitor trait for traversing the section tree
///
/// Default implementations are empty, so you only need to override the methods you care about.
/// `leave_section` is called after all children of a section have been visited.
pub trait Visitor {
    fn visit_section(&mut self, _section: &Section) {}
    fn leave_section(&mut self, _section: &Section) {}
    fn visit_text(&mut self, _text: &str) {}
    fn visit_blank(&mut self) {}
}

/// Helper function to visit all children in a ChildNode slice
pub fn visit_children(visitor: &mut dyn Visitor, children: &[ChildNode]) {
    for child in children {
        child.accept(visitor);
    }
}

/// Common interface for all tree nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;

    /// Accept a visitor for traversing this node and its children
    fn accept(&self, visitor: &mut dyn Visitor);
}
