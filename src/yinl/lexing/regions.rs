//! Region Locator
//!
//! Splits raw document text into its three regions:
//!
//! - header: from the `header:` marker up to (not including) the first section line
//! - body: everything between the header end and the footer marker
//! - footer: from the `footer:` marker to the end of the text
//!
//! This is a pure function of the text; nothing is parsed beyond recognizing the marker and
//! section-start lines.

use super::patterns::{is_marker, section_name};
use crate::yinl::error::StructuralError;
use serde::Serialize;
use std::ops::Range;

pub const HEADER_MARKER: &str = "header:";
pub const FOOTER_MARKER: &str = "footer:";

/// A located region: byte range plus the 1-based line number it starts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    pub span: Range<usize>,
    pub first_line: usize,
}

impl Region {
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.span.clone()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Regions {
    pub header: Region,
    pub body: Region,
    pub footer: Region,
}

struct Line<'a> {
    number: usize,
    start: usize,
    text: &'a str,
}

fn lines_with_offsets(text: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    text.split_inclusive('\n')
        .enumerate()
        .map(move |(idx, raw)| {
            let line = Line {
                number: idx + 1,
                start: offset,
                text: raw.trim_end_matches(['\n', '\r']),
            };
            offset += raw.len();
            line
        })
}

/// Locate the header, body and footer regions of `text`.
pub fn locate(text: &str) -> Result<Regions, StructuralError> {
    let mut header_line: Option<(usize, usize)> = None;
    let mut first_section: Option<(usize, usize)> = None;
    let mut footer_line: Option<(usize, usize)> = None;

    for line in lines_with_offsets(text) {
        match header_line {
            None => {
                if is_marker(line.text, HEADER_MARKER) {
                    header_line = Some((line.start, line.number));
                } else if is_marker(line.text, FOOTER_MARKER) && footer_line.is_none() {
                    // Remember it only to report the ordering problem below.
                    footer_line = Some((line.start, line.number));
                }
            }
            Some(_) => {
                if is_marker(line.text, FOOTER_MARKER) {
                    footer_line = Some((line.start, line.number));
                    break;
                }
                if first_section.is_none() && section_name(line.text).is_some() {
                    first_section = Some((line.start, line.number));
                }
            }
        }
    }

    let (header_start, header_first_line) = header_line.ok_or(StructuralError::MissingHeader)?;
    let (footer_start, footer_first_line) = match footer_line {
        Some((start, _)) if start < header_start => {
            return Err(StructuralError::FooterBeforeHeader)
        }
        Some(found) => found,
        None => return Err(StructuralError::MissingFooter),
    };
    let (header_end, body_first_line) = first_section.unwrap_or((footer_start, footer_first_line));

    let regions = Regions {
        header: Region {
            span: header_start..header_end,
            first_line: header_first_line,
        },
        body: Region {
            span: header_end..footer_start,
            first_line: body_first_line,
        },
        footer: Region {
            span: footer_start..text.len(),
            first_line: footer_first_line,
        },
    };
    log::debug!(
        "located regions: header {:?}, body {:?}, footer {:?}",
        regions.header.span,
        regions.body.span,
        regions.footer.span
    );
    Ok(regions)
}
