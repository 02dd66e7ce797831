//! Section Tree Builder
//!
//! Builds the forest of root sections from the body text with an explicit stack of open
//! sections. For every non-blank line:
//!
//! 1. Close (pop) every open section whose column is greater than or equal to the line's.
//! 2. If the line is a `section <name>:` line, open a new section as a child of the new top of
//!    the stack, or as a new root.
//! 3. Otherwise attach the trimmed line as text content of the top section.
//!
//! Blank lines become [`ChildNode::Blank`] markers of the top section. Sections still open at the
//! end of the body are closed implicitly.
//!
//! The stack owns the open sections; a section is moved into its parent when it is closed, so
//! each section has exactly one owner throughout.

use crate::yinl::ast::{ChildNode, Section};
use crate::yinl::error::{IndentContext, ParseWarning};
use crate::yinl::lexing::{infer_unit, measure, section_name};
use crate::yinl::parsing::{record_warning, ParseOptions};

struct OpenSection {
    section: Section,
    /// Raw column of the `section` line.
    column: usize,
}

struct TreeBuilder {
    stack: Vec<OpenSection>,
    roots: Vec<Section>,
}

impl TreeBuilder {
    fn close_top(&mut self) {
        let Some(open) = self.stack.pop() else {
            return;
        };
        log::trace!("close section '{}'", open.section.name);
        match self.stack.last_mut() {
            Some(parent) => parent.section.children.push(ChildNode::Section(open.section)),
            None => self.roots.push(open.section),
        }
    }

    fn close_from(&mut self, column: usize) {
        while self.stack.last().is_some_and(|top| top.column >= column) {
            self.close_top();
        }
    }

    fn next_position(&self) -> usize {
        match self.stack.last() {
            Some(parent) => parent.section.next_position(),
            None => self.roots.len(),
        }
    }
}

/// Build the section forest from `body`, whose first line is line `first_line` of the document.
pub fn build_sections(
    body: &str,
    first_line: usize,
    options: &ParseOptions,
    warnings: &mut Vec<ParseWarning>,
) -> Vec<Section> {
    let inference = infer_unit(
        body.lines()
            .filter(|line| section_name(line).is_some())
            .map(|line| measure(line, options.tab_width)),
        options.default_indent_unit,
    );
    if inference.ambiguous {
        record_warning(
            warnings,
            ParseWarning::AmbiguousIndentation {
                context: IndentContext::Sections,
                unit: inference.unit,
                widths: inference.widths.clone(),
            },
        );
    }
    let unit = inference.unit;
    log::debug!("sections: indentation unit {unit}");

    let mut builder = TreeBuilder {
        stack: Vec::new(),
        roots: Vec::new(),
    };

    for (idx, line) in body.lines().enumerate() {
        let number = first_line + idx;

        if line.trim().is_empty() {
            if let Some(top) = builder.stack.last_mut() {
                top.section.children.push(ChildNode::Blank);
            }
            continue;
        }

        let column = measure(line, options.tab_width);
        builder.close_from(column);

        if let Some(name) = section_name(line) {
            let section = Section::new(name.trim(), column / unit, builder.next_position(), number);
            log::trace!("open section '{}' at indent {}", section.name, section.indent);
            builder.stack.push(OpenSection { section, column });
        } else if let Some(top) = builder.stack.last_mut() {
            top.section
                .children
                .push(ChildNode::Text(line.trim().to_string()));
        } else {
            record_warning(
                warnings,
                ParseWarning::OrphanLine {
                    line: number,
                    text: line.trim().to_string(),
                },
            );
        }
    }

    while !builder.stack.is_empty() {
        builder.close_top();
    }
    builder.roots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(body: &str) -> (Vec<Section>, Vec<ParseWarning>) {
        let mut warnings = Vec::new();
        let roots = build_sections(body, 1, &ParseOptions::default(), &mut warnings);
        (roots, warnings)
    }

    fn indents(section: &Section, out: &mut Vec<usize>) {
        out.push(section.indent);
        for child in section.iter_sections() {
            indents(child, out);
        }
    }

    #[test]
    fn test_nested_section_is_a_child() {
        let (roots, _) = build("section A:\n    text\n    section B:\n        inner\nsection C:\n");
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].name, "A");
        assert_eq!(
            roots[0].children,
            vec![
                ChildNode::Text("text".to_string()),
                ChildNode::Section({
                    let mut b = Section::new("B", 1, 0, 3);
                    b.children.push(ChildNode::Text("inner".to_string()));
                    b
                }),
            ]
        );
        assert_eq!(roots[1].name, "C");
        assert_eq!(roots[1].position, 1);
    }

    #[test]
    fn test_normalized_indents_four_spaces() {
        let (roots, warnings) =
            build("section A:\n    section B:\n        section C:\n            deep\n");
        let mut out = Vec::new();
        indents(&roots[0], &mut out);
        assert_eq!(out, vec![0, 1, 2]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_normalized_indents_two_and_six() {
        let (roots, _) = build("section A:\n  section B:\n      section C:\n        deep\n");
        let mut out = Vec::new();
        indents(&roots[0], &mut out);
        assert_eq!(out, vec![0, 1, 3]);
    }

    #[test]
    fn test_sibling_after_nested_content() {
        let (roots, _) = build(
            "section A:\n    section A1:\n        one\n    section A2:\n        two\n    back in A\n",
        );
        let a = &roots[0];
        let names: Vec<_> = a.iter_sections().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A1", "A2"]);
        assert_eq!(a.iter_sections().map(|s| s.position).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(a.children.last(), Some(&ChildNode::Text("back in A".to_string())));
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let (roots, _) = build("section A:\n    one\n\n\n    two\n");
        assert_eq!(
            roots[0].children,
            vec![
                ChildNode::Text("one".to_string()),
                ChildNode::Blank,
                ChildNode::Blank,
                ChildNode::Text("two".to_string()),
            ]
        );
    }

    #[test]
    fn test_line_at_root_level_closes_everything() {
        let (roots, warnings) = build("section A:\n    section B:\n        b\nstray\n");
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].section_count(), 1);
        assert_eq!(
            warnings,
            vec![ParseWarning::OrphanLine {
                line: 4,
                text: "stray".to_string()
            }]
        );
    }

    #[test]
    fn test_unterminated_sections_close_at_end() {
        let (roots, _) = build("section A:\n    section B:\n        section C:\n");
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].find("C").map(|c| c.indent), Some(2));
        assert_eq!(roots[0].find("C").map(|c| c.line), Some(3));
    }

    #[test]
    fn test_macro_call_line_is_content() {
        let (roots, _) = build("section A:\n    section Intro: (x)\n");
        assert_eq!(roots[0].section_count(), 0);
        assert_eq!(roots[0].iter_text().collect::<Vec<_>>(), vec!["section Intro: (x)"]);
    }

    #[test]
    fn test_ambiguous_indentation_warns() {
        let (roots, warnings) = build("section A:\n    section B:\n      section C:\n");
        assert_eq!(roots.len(), 1);
        assert!(matches!(
            warnings.as_slice(),
            [ParseWarning::AmbiguousIndentation { unit: 2, .. }]
        ));
    }
}
