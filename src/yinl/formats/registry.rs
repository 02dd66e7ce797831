//! Format registry for document serialization
//!
//! Each format implements [`Formatter`] and is looked up by name in a [`FormatRegistry`].

use crate::yinl::ast::Document;
use crate::yinl::error::MacroError;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    /// Only produced by formatters running in strict mode.
    #[error("{} unresolved macro call(s)", .0.len())]
    UnresolvedMacros(Vec<MacroError>),
}

/// Serializes a [`Document`] to a string representation.
pub trait Formatter: Send + Sync {
    /// Name used for lookup (e.g. "markdown", "treeviz")
    fn name(&self) -> &str;

    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }

    /// Extension of files holding this format's output.
    fn file_extension(&self) -> &str {
        "txt"
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any formatter with the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        log::debug!("serializing document as {format}");
        formatter.serialize(doc)
    }

    /// Format names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// `(name, description)` pairs, sorted by name.
    pub fn describe_formats(&self) -> Vec<(String, String)> {
        self.list_formats()
            .into_iter()
            .filter_map(|name| {
                let description = self.get(&name)?.description().to_string();
                Some((name, description))
            })
            .collect()
    }

    /// Registry with the built-in formats, rendering markdown with `options`.
    pub fn with_options(options: super::RenderOptions) -> Self {
        let mut registry = Self::new();
        registry.register(super::MarkdownFormatter::new(options));
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }

    pub fn with_defaults() -> Self {
        Self::with_options(super::RenderOptions::default())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yinl::parsing::parse_document;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    fn doc() -> Document {
        parse_document("header:\n    title: T\nsection A:\n    a\nfooter:\n").unwrap()
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);
        assert!(registry.has("test"));
        assert_eq!(registry.get("test").map(|f| f.description()), Some("Test formatter"));
        assert_eq!(registry.serialize(&doc(), "test").unwrap(), "test output");
    }

    #[test]
    fn test_format_not_found() {
        let registry = FormatRegistry::new();
        assert_eq!(
            registry.serialize(&doc(), "nonexistent"),
            Err(FormatError::FormatNotFound("nonexistent".to_string()))
        );
    }

    #[test]
    fn test_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["json", "markdown", "treeviz", "yaml"]
        );
        assert!(registry.describe_formats().iter().all(|(_, d)| !d.is_empty()));

        let extensions: Vec<_> = registry
            .list_formats()
            .iter()
            .filter_map(|name| registry.get(name).map(|f| f.file_extension().to_string()))
            .collect();
        assert_eq!(extensions, vec!["json", "md", "txt", "yaml"]);
    }

    #[test]
    fn test_replace_existing() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);
        registry.register(TestFormatter);
        assert_eq!(registry.list_formats().len(), 1);
    }
}
