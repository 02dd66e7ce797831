//! Shorthand element
//!
//! A shorthand maps a token to a replacement string. In text, `\token` written as its own
//! space-delimited word is replaced; anything else is left alone.

use linked_hash_map::LinkedHashMap;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShorthandTable {
    entries: LinkedHashMap<String, String>,
}

impl ShorthandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless `token` is already defined. Returns whether the entry was added.
    pub fn insert_first(&mut self, token: impl Into<String>, replacement: impl Into<String>) -> bool {
        let token = token.into();
        if self.entries.contains_key(&token) {
            return false;
        }
        self.entries.insert(token, replacement.into());
        true
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every `\token` word of `text`.
    pub fn apply(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_string();
        }
        text.split(' ')
            .map(|word| {
                word.strip_prefix('\\')
                    .and_then(|token| self.get(token))
                    .unwrap_or(word)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
