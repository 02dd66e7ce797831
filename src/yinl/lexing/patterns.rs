//! Single-line token recognizers
//!
//! Structure (blocks, the section tree) is handled by explicit line scanners. Regular expressions
//! are only used here, for flat tokens that never span lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// `section <name>:` at any indentation, ending at the colon.
static SECTION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*section[ \t]+(.+?)[ \t]*:[ \t]*$").unwrap());

/// `name: (a, b)` as a whole line; the header of a macro definition.
static MACRO_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]{0,49}):[ ]?\(([^()\n]*)\)[ \t]*$").unwrap()
});

/// `name: (a, b)` anywhere in a line; a macro call site.
static MACRO_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z_][A-Za-z0-9_-]{0,49}):[ ]?\(([^()\n]*)\)").unwrap());

/// A recognized macro call inside a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroCall<'a> {
    /// Byte range of the whole call in the scanned text.
    pub span: std::ops::Range<usize>,
    pub name: &'a str,
    pub args: Vec<&'a str>,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Byte offset of the first colon not preceded by a backslash.
pub fn first_unescaped_colon(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            ':' if !escaped => return Some(idx),
            _ => escaped = false,
        }
    }
    None
}

/// Replace every `\:` with a plain colon.
pub fn unescape_colons(text: &str) -> String {
    text.replace("\\:", ":")
}

/// Whether `line` is the region marker `marker` (e.g. `header:`) at column 0.
pub fn is_marker(line: &str, marker: &str) -> bool {
    line.trim_end() == marker
}

/// Name of the section opened by `line`, if it is a section start.
pub fn section_name(line: &str) -> Option<&str> {
    let captures = SECTION_START.captures(line)?;
    let name = captures.get(1)?.as_str();
    if name.ends_with('\\') {
        return None;
    }
    Some(name)
}

/// Name and raw parameter list of a macro definition header.
pub fn macro_header(line: &str) -> Option<(&str, &str)> {
    let captures = MACRO_HEADER.captures(line)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Flat comma split of a parenthesized argument list. `""` yields no arguments.
pub fn split_args(raw: &str) -> Vec<&str> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(str::trim).collect()
}

/// All macro calls in `text`, in order.
///
/// A candidate whose name directly follows a name character or a backslash is not a call; this
/// is how `name\: (x)` and words such as `x-name: (y)` stay literal.
pub fn find_macro_calls(text: &str) -> Vec<MacroCall<'_>> {
    MACRO_CALL
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let preceding = text[..whole.start()].chars().next_back();
            if preceding.is_some_and(|c| is_name_char(c) || c == '\\') {
                return None;
            }
            Some(MacroCall {
                span: whole.range(),
                name: captures.get(1)?.as_str(),
                args: split_args(captures.get(2)?.as_str()),
            })
        })
        .collect()
}
