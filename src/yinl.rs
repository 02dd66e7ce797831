//! yinl: an indentation-based markup language for papers
//!
//! A document has three regions: a `header:` key-value block, a body of nested
//! `section <name>:` blocks, and a `footer:` block that declares citations, macros and
//! shorthands. [`parsing`] turns source text into an [`ast::Document`]; [`formats`] renders it.
//!
//! ```rust,ignore
//! use yinl::yinl::formats::to_markdown;
//! use yinl::yinl::parsing::parse_document;
//!
//! let doc = parse_document(source)?;
//! println!("{}", to_markdown(&doc));
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod testing;
