//! Markdown renderer
//!
//! The output is a preamble built from the header followed by one heading per section:
//!
//! ```text
//! # <title>
//!
//! **Author:** <authors>
//!
//! **Date:** <date>
//!
//! ---
//!
//! ## <section>
//!
//! <content lines>
//! ```
//!
//! Each text line is passed through the shorthand table, then macro substitution, then colon
//! unescaping, in that order. Blank source lines are kept one for one. A nested section is
//! followed by the rule marker on its own paragraph.

use super::registry::{FormatError, Formatter};
use crate::yinl::ast::{ChildNode, Document, Section};
use crate::yinl::error::MacroError;
use crate::yinl::lexing::unescape_colons;

const MAX_HEADING_LEVEL: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Heading level of root sections.
    pub heading_base_level: usize,
    /// Emitted after the preamble and after every nested section. Empty disables it.
    pub rule_marker: String,
    /// Heading of the footer citation list. Empty disables the list.
    pub references_heading: String,
    /// Make [`MarkdownFormatter`] fail on unresolved macro calls.
    pub strict_macros: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading_base_level: 2,
            rule_marker: "---".to_string(),
            references_heading: "References".to_string(),
            strict_macros: false,
        }
    }
}

/// Rendered markdown plus the macro call sites that could not be expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub markdown: String,
    pub errors: Vec<MacroError>,
}

struct MarkdownWriter<'a> {
    doc: &'a Document,
    options: &'a RenderOptions,
    lines: Vec<String>,
    errors: Vec<MacroError>,
}

impl<'a> MarkdownWriter<'a> {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Start a new paragraph unless one was just started.
    fn break_paragraph(&mut self) {
        if self.lines.last().is_some_and(|line| !line.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn heading(&mut self, level: usize, text: &str) {
        self.break_paragraph();
        let level = level.clamp(1, MAX_HEADING_LEVEL);
        self.push(format!("{} {}", "#".repeat(level), text));
        self.push("");
    }

    fn rule(&mut self) {
        if self.options.rule_marker.is_empty() {
            return;
        }
        self.break_paragraph();
        self.push(self.options.rule_marker.clone());
        self.push("");
    }

    fn preamble(&mut self) {
        let doc = self.doc;
        let start = self.lines.len();

        if let Some(title) = doc.title() {
            self.heading(1, &title);
        }
        let authors = doc.authors();
        if !authors.is_empty() {
            let label = if authors.len() == 1 { "Author" } else { "Authors" };
            self.push(format!("**{label}:** {}", authors.join(", ")));
            self.push("");
        }
        if let Some(institute) = doc.institute() {
            self.push(format!("**Institute:** {institute}"));
            self.push("");
        }
        if let Some(date) = doc.date() {
            self.push(format!("**Date:** {date}"));
            self.push("");
        }

        if self.lines.len() > start {
            self.rule();
        }
    }

    fn text(&mut self, text: &str, section: &str) {
        let shorthanded = self.doc.shorthands.apply(text);
        let (expanded, errors) = self.doc.macros.substitute(&shorthanded, section);
        self.errors.extend(errors);
        self.push(unescape_colons(&expanded));
    }

    fn section(&mut self, section: &Section, depth: usize) {
        log::trace!("render section '{}' at depth {depth}", section.name);
        self.heading(
            self.options.heading_base_level + depth,
            &unescape_colons(&section.name),
        );
        for child in &section.children {
            match child {
                ChildNode::Section(nested) => self.section(nested, depth + 1),
                ChildNode::Text(text) => self.text(text, &section.name),
                ChildNode::Blank => self.push(""),
            }
        }
        if depth >= 1 {
            self.rule();
        }
    }

    fn references(&mut self) {
        let options = self.options;
        let citations = self.doc.citations();
        if citations.is_empty() || options.references_heading.is_empty() {
            return;
        }
        self.heading(options.heading_base_level, &options.references_heading);
        for citation in citations {
            self.push(format!("- {}", unescape_colons(citation)));
        }
    }

    fn finish(self) -> Rendered {
        let mut markdown = self.lines.join("\n");
        if !markdown.is_empty() {
            markdown.push('\n');
        }
        Rendered {
            markdown,
            errors: self.errors,
        }
    }
}

pub fn render(doc: &Document, options: &RenderOptions) -> Rendered {
    let mut writer = MarkdownWriter {
        doc,
        options,
        lines: Vec::new(),
        errors: Vec::new(),
    };
    writer.preamble();
    for section in &doc.sections {
        writer.section(section, 0);
    }
    writer.references();

    let rendered = writer.finish();
    log::debug!(
        "rendered {} bytes of markdown, {} macro errors",
        rendered.markdown.len(),
        rendered.errors.len()
    );
    rendered
}

/// Render with default options, dropping the error list.
pub fn to_markdown(doc: &Document) -> String {
    render(doc, &RenderOptions::default()).markdown
}

#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    options: RenderOptions,
}

impl MarkdownFormatter {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Formatter for MarkdownFormatter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let rendered = render(doc, &self.options);
        if self.options.strict_macros && !rendered.errors.is_empty() {
            return Err(FormatError::UnresolvedMacros(rendered.errors));
        }
        Ok(rendered.markdown)
    }

    fn description(&self) -> &str {
        "Markdown with macros and shorthands expanded"
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yinl::parsing::parse_document;

    fn doc(body: &str, footer: &str) -> Document {
        let text = format!("header:\n    title: T\n{body}footer:\n{footer}");
        parse_document(&text).unwrap()
    }

    #[test]
    fn test_demo_document() {
        let doc = parse_document(
            "header:\n    title: Demo\n    author: A. Author\n    date: 2024\n\nsection Intro:\n    Hello world.\n\nfooter:\n    citations:\n    macros:\n    shorthands:\n",
        )
        .unwrap();
        let rendered = render(&doc, &RenderOptions::default());
        assert_eq!(
            rendered.markdown,
            "# Demo\n\n**Author:** A. Author\n\n**Date:** 2024\n\n---\n\n## Intro\n\nHello world.\n\n"
        );
        assert!(rendered.errors.is_empty());
    }

    #[test]
    fn test_preamble_fields() {
        let doc = parse_document(
            "header:\n    title: Paper\n    authors: A. One, B. Two\n    institute: Lab\\: North\nsection A:\nfooter:\n",
        )
        .unwrap();
        let md = to_markdown(&doc);
        assert!(md.starts_with(
            "# Paper\n\n**Authors:** A. One, B. Two\n\n**Institute:** Lab: North\n\n---\n\n## A\n"
        ));
    }

    #[test]
    fn test_nested_headings_and_rule() {
        let doc = doc("section A:\n    a\n    section B:\n        b\n    after\n", "");
        let md = to_markdown(&doc);
        assert!(md.contains("## A\n\na\n\n### B\n\nb\n\n---\n\nafter\n"), "{md}");
    }

    #[test]
    fn test_heading_level_is_clamped() {
        let options = RenderOptions {
            heading_base_level: 5,
            ..RenderOptions::default()
        };
        let doc = doc("section A:\n    section B:\n        section C:\n", "");
        let md = render(&doc, &options).markdown;
        assert!(md.contains("##### A\n"));
        assert!(md.contains("\n###### B\n"));
        assert!(md.contains("\n###### C\n"));
    }

    #[test]
    fn test_double_blank_lines_are_kept() {
        let doc = doc("section A:\n    one\n\n\n    two\n", "");
        assert!(to_markdown(&doc).contains("one\n\n\ntwo\n"));
    }

    #[test]
    fn test_substitution_order() {
        let doc = doc(
            "section A:\n    see \\fig and ratio 1\\:2\n",
            "    macros:\n        link: (target)\n            [target](#target)\n    shorthands:\n        fig: link: (figures)\n",
        );
        let rendered = render(&doc, &RenderOptions::default());
        assert!(
            rendered
                .markdown
                .contains("see [figures](#figures) and ratio 1:2\n"),
            "{}",
            rendered.markdown
        );
        assert!(rendered.errors.is_empty());
    }

    #[test]
    fn test_unknown_macro_is_left_literal() {
        let doc = doc("section Intro:\n    before nope: (x) after\n", "");
        let rendered = render(&doc, &RenderOptions::default());
        assert!(rendered.markdown.contains("before nope: (x) after\n"));
        assert_eq!(
            rendered.errors,
            vec![MacroError::UnknownMacro {
                name: "nope".to_string(),
                section: "Intro".to_string()
            }]
        );
    }

    #[test]
    fn test_strict_formatter_fails_on_unresolved_calls() {
        let doc = doc("section Intro:\n    nope: (x)\n", "");
        let strict = MarkdownFormatter::new(RenderOptions {
            strict_macros: true,
            ..RenderOptions::default()
        });
        assert!(matches!(
            strict.serialize(&doc),
            Err(FormatError::UnresolvedMacros(errors)) if errors.len() == 1
        ));
        assert!(MarkdownFormatter::default().serialize(&doc).is_ok());
    }

    #[test]
    fn test_references() {
        let doc = doc(
            "section A:\n    a\n",
            "    citations:\n        Knuth 1984\n        Lamport 1994\n",
        );
        let md = to_markdown(&doc);
        assert!(md.ends_with("## References\n\n- Knuth 1984\n- Lamport 1994\n"));

        let disabled = RenderOptions {
            references_heading: String::new(),
            ..RenderOptions::default()
        };
        assert!(!render(&doc, &disabled).markdown.contains("References"));
    }

    #[test]
    fn test_empty_rule_marker() {
        let options = RenderOptions {
            rule_marker: String::new(),
            ..RenderOptions::default()
        };
        let doc = doc("section A:\n    section B:\n", "");
        let md = render(&doc, &options).markdown;
        assert_eq!(md, "# T\n\n## A\n\n### B\n\n");
    }
}
