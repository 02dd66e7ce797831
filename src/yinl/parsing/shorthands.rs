//! Shorthand Table Builder
//!
//! Each non-blank line of the footer's `shorthands` value is `token: replacement`. The token may
//! be written with its leading backslash (`\eg: e.g.`) or without it. The first definition of a
//! token wins.
//!
//! Errors carry the source line from `line_numbers` when it is known, otherwise the 1-based
//! position within `lines`.

use crate::yinl::ast::ShorthandTable;
use crate::yinl::error::MalformedBlockError;
use crate::yinl::lexing::{first_unescaped_colon, unescape_colons};

pub fn build_shorthands(
    lines: &[String],
    line_numbers: &[usize],
) -> Result<ShorthandTable, MalformedBlockError> {
    let mut table = ShorthandTable::new();
    for (idx, line) in lines.iter().enumerate() {
        let content = line.trim();
        if content.is_empty() {
            continue;
        }
        let invalid = || MalformedBlockError::InvalidShorthand {
            line: line_numbers.get(idx).copied().unwrap_or(idx + 1),
            text: content.to_string(),
        };

        let colon = first_unescaped_colon(content).ok_or_else(invalid)?;
        let token = content[..colon].trim();
        let token = token.strip_prefix('\\').unwrap_or(token);
        if token.is_empty() {
            return Err(invalid());
        }
        let token = unescape_colons(token);
        let replacement = unescape_colons(content[colon + 1..].trim());

        if !table.insert_first(token.as_str(), replacement) {
            log::warn!("shorthand '\\{token}' is defined more than once; the first definition wins");
        }
    }
    log::debug!("built {} shorthands", table.len());
    Ok(table)
}
