//! Fluent assertion API for parsed documents

use crate::yinl::ast::{ChildNode, Document, Section};

// ============================================================================
// Entry Point
// ============================================================================

pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

fn summarize_sections<'a>(sections: impl Iterator<Item = &'a Section>) -> String {
    sections
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Document Assertions
// ============================================================================

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    pub fn title(self, expected: &str) -> Self {
        assert_eq!(
            self.doc.title().as_deref(),
            Some(expected),
            "Expected title '{expected}'"
        );
        self
    }

    pub fn authors(self, expected: &[&str]) -> Self {
        assert_eq!(self.doc.authors(), expected, "Unexpected authors");
        self
    }

    pub fn section_count(self, expected: usize) -> Self {
        let actual = self.doc.sections.len();
        assert_eq!(
            actual,
            expected,
            "Expected {expected} root sections, found {actual}: [{}]",
            summarize_sections(self.doc.sections.iter())
        );
        self
    }

    pub fn section<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        assert!(
            index < self.doc.sections.len(),
            "Section index {index} out of bounds (document has {} root sections)",
            self.doc.sections.len()
        );
        assertion(SectionAssertion {
            section: &self.doc.sections[index],
            context: format!("sections[{index}]"),
        });
        self
    }

    pub fn macro_count(self, expected: usize) -> Self {
        assert_eq!(self.doc.macros.len(), expected, "Unexpected macro count");
        self
    }

    pub fn shorthand(self, token: &str, replacement: &str) -> Self {
        assert_eq!(
            self.doc.shorthands.get(token),
            Some(replacement),
            "Unexpected shorthand for '{token}'"
        );
        self
    }

    pub fn warning_count(self, expected: usize) -> Self {
        assert_eq!(
            self.doc.warnings.len(),
            expected,
            "Unexpected warnings: {:?}",
            self.doc.warnings
        );
        self
    }
}

// ============================================================================
// Section Assertions
// ============================================================================

pub struct SectionAssertion<'a> {
    section: &'a Section,
    context: String,
}

impl<'a> SectionAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.section.name, expected,
            "{}: expected section name '{expected}'",
            self.context
        );
        self
    }

    pub fn indent(self, expected: usize) -> Self {
        assert_eq!(
            self.section.indent, expected,
            "{}: unexpected indent",
            self.context
        );
        self
    }

    pub fn position(self, expected: usize) -> Self {
        assert_eq!(
            self.section.position, expected,
            "{}: unexpected position",
            self.context
        );
        self
    }

    pub fn line(self, expected: usize) -> Self {
        assert_eq!(
            self.section.line, expected,
            "{}: unexpected source line",
            self.context
        );
        self
    }

    /// Text children, in order, ignoring blanks and nested sections.
    pub fn text_lines(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.section.iter_text().collect();
        assert_eq!(actual, expected, "{}: unexpected text lines", self.context);
        self
    }

    pub fn blank_count(self, expected: usize) -> Self {
        let actual = self
            .section
            .children
            .iter()
            .filter(|child| child.is_blank())
            .count();
        assert_eq!(actual, expected, "{}: unexpected blank count", self.context);
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.section.children.len(),
            expected,
            "{}: unexpected child count",
            self.context
        );
        self
    }

    pub fn section_count(self, expected: usize) -> Self {
        let actual = self.section.section_count();
        assert_eq!(
            actual,
            expected,
            "{}: expected {expected} nested sections, found {actual}: [{}]",
            self.context,
            summarize_sections(self.section.iter_sections())
        );
        self
    }

    /// Assert on the `index`-th nested section.
    pub fn child_section<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(SectionAssertion<'a>),
    {
        let Some(child) = self.section.iter_sections().nth(index) else {
            panic!(
                "{}: nested section index {index} out of bounds ({} nested sections)",
                self.context,
                self.section.section_count()
            );
        };
        assertion(SectionAssertion {
            section: child,
            context: format!("{}.sections[{index}]", self.context),
        });
        self
    }

    /// Assert that the last child is text equal to `expected`.
    pub fn ends_with_text(self, expected: &str) -> Self {
        let last = self.section.children.iter().rev().find(|c| !c.is_blank());
        assert_eq!(
            last,
            Some(&ChildNode::Text(expected.to_string())),
            "{}: unexpected last child",
            self.context
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yinl::testing::Samples;

    #[test]
    fn test_assertions_on_paper() {
        let doc = Samples::parse("paper.yi");
        assert_doc(&doc)
            .title("Why YINL")
            .authors(&["A. Author", "B. Author"])
            .section_count(2)
            .macro_count(2)
            .shorthand("eg", "e.g.")
            .warning_count(0)
            .section(0, |s| {
                s.name("Introduction")
                    .indent(0)
                    .position(0)
                    .line(8)
                    .blank_count(1)
                    .section_count(1)
                    .child_section(0, |m| {
                        m.name("Motivation").indent(1).position(0).line(13);
                    });
            })
            .section(1, |s| {
                s.name("Results")
                    .position(1)
                    .text_lines(&["Everything renders at 10\\:30 sharp."]);
            });
    }

    #[test]
    #[should_panic(expected = "Expected 3 root sections")]
    fn test_failure_message_lists_sections() {
        let doc = Samples::parse("demo.yi");
        assert_doc(&doc).section_count(3);
    }
}
