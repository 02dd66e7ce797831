//! Testing utilities for document assertions
//!
//! Two tools are meant to be used together in parser and renderer tests:
//!
//! 1. [`Samples`] gives access to the curated `.yi` documents under `samples/`. Prefer them over
//!    ad-hoc strings when a test is about whole documents.
//! 2. [`assert_doc`] is a fluent assertion API over the parsed [`Document`]:
//!
//! ```rust,ignore
//! use yinl::yinl::testing::{assert_doc, Samples};
//!
//! let doc = Samples::parse("paper.yi");
//! assert_doc(&doc)
//!     .title("Why YINL")
//!     .section_count(2)
//!     .section(0, |s| {
//!         s.name("Introduction")
//!             .child_section(0, |m| m.name("Motivation").indent(1));
//!     });
//! ```
//!
//! [`Document`]: crate::yinl::ast::Document

pub mod assertions;
pub mod samples;

pub use assertions::{assert_doc, DocumentAssertion, SectionAssertion};
pub use samples::Samples;
