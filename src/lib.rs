//! # yinl
//!
//! A parser and Markdown renderer for the yinl markup format.
//!
//! ## Testing
//!
//! For testing guidelines, see the [testing module](yinl::testing). Document tests should use the
//! curated samples and the fluent document assertions.

pub mod yinl;
