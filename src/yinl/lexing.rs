//! Line-level recognition
//!
//! Everything here works on single lines or on flat byte ranges: indentation widths and unit
//! inference, colon escapes, the section-start and macro recognizers, and the region locator.
//! The structural scanners in [`parsing`](crate::yinl::parsing) are built on top of these.

pub mod indentation;
pub mod patterns;
pub mod regions;

pub use indentation::{infer_unit, measure, strip_columns, UnitInference};
pub use patterns::{find_macro_calls, first_unescaped_colon, section_name, unescape_colons, MacroCall};
pub use regions::{locate, Region, Regions, FOOTER_MARKER, HEADER_MARKER};
