//! Document tree for yinl
//!
//! A [`Document`] owns two key-value [`Block`]s (header and footer), the compiled
//! [`MacroTable`] and [`ShorthandTable`], and the forest of root [`Section`]s. Section children
//! are the tagged variant [`ChildNode`]: a nested section, a text line, or a blank-line marker.

pub mod elements;
pub mod traits;

pub use elements::{
    Block, ChildNode, Document, Macro, MacroTable, Section, Segment, ShorthandTable,
};
pub use traits::{AstNode, Visitor};
