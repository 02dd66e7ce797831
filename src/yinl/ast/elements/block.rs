//! Key-value block element
//!
//! The header and footer are both parsed into a [`Block`]: an insertion-ordered mapping from key
//! to the list of raw value lines. Multi-line values keep one entry per source line, with their
//! relative indentation; consumers decide how to join or split them.
//!
//! Blocks built by the parser also remember the source line of every value line, so sub-parsers
//! can report absolute line numbers. Those numbers are not part of equality.

use linked_hash_map::LinkedHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Block {
    /// Marker name of the block, e.g. `header`.
    pub name: String,
    entries: LinkedHashMap<String, Vec<String>>,
    #[serde(skip)]
    line_numbers: LinkedHashMap<String, Vec<usize>>,
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.entries == other.entries
    }
}

impl Eq for Block {}

impl Block {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: LinkedHashMap::new(),
            line_numbers: LinkedHashMap::new(),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Value lines of `key`.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Value lines of `key`, or an empty slice.
    pub fn lines(&self, key: &str) -> &[String] {
        self.get(key).unwrap_or(&[])
    }

    /// Absolute source line of each value line of `key`. Empty when the value was not parsed
    /// from source.
    pub fn line_numbers(&self, key: &str) -> &[usize] {
        self.line_numbers.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First value line of `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|lines| lines.first())
            .map(String::as_str)
    }

    /// Value lines of `key` joined with single spaces, blank lines skipped.
    pub fn joined(&self, key: &str) -> Option<String> {
        let lines = self.get(key)?;
        Some(
            lines
                .iter()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, lines)| (key.as_str(), lines.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace the value of `key`. Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, lines: Vec<String>) -> Option<Vec<String>> {
        let key = key.into();
        self.line_numbers.remove(&key);
        self.entries.insert(key, lines)
    }

    /// Insert or replace `key` with an empty value whose lines will come from source.
    pub(crate) fn open_key(&mut self, key: &str) {
        self.entries.insert(key.to_string(), Vec::new());
        self.line_numbers.insert(key.to_string(), Vec::new());
    }

    pub(crate) fn push_line(&mut self, key: &str, line: String, number: usize) {
        if let Some(lines) = self.entries.get_mut(key) {
            lines.push(line);
            self.line_numbers
                .entry(key.to_string())
                .or_insert_with(Vec::new)
                .push(number);
        }
    }

    /// Serialize back to block syntax, four spaces per level.
    ///
    /// A single-line value is written as `key: value`; anything else as `key:` followed by the
    /// indented lines.
    pub fn to_source(&self) -> String {
        let mut out = format!("{}:\n", self.name);
        for (key, lines) in self.iter() {
            match lines {
                [single] if !single.is_empty() && !single.starts_with([' ', '\t']) => {
                    out.push_str(&format!("    {key}: {single}\n"));
                }
                _ => {
                    out.push_str(&format!("    {key}:\n"));
                    for line in lines {
                        if line.is_empty() {
                            out.push('\n');
                        } else {
                            out.push_str(&format!("        {line}\n"));
                        }
                    }
                }
            }
        }
        out
    }
}
