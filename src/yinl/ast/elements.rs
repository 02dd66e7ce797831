//! Tree elements

pub mod block;
pub mod document;
pub mod macros;
pub mod section;
pub mod shorthand;

pub use block::Block;
pub use document::Document;
pub use macros::{Macro, MacroTable, Segment};
pub use section::{ChildNode, Section};
pub use shorthand::ShorthandTable;
