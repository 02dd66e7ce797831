//! Key-Value Block Parser
//!
//! Parses the header and footer blocks. Each block starts with its marker line (`header:` or
//! `footer:`); every following line is measured against the block's base indentation:
//!
//! - `key:` at the base level opens a key whose value is the deeper-indented lines that follow,
//!   stripped of one indentation unit (deeper structure is kept for sub-parsers such as macros).
//! - `key: value` at the base level defines a one-line value.
//! - Any other line is appended to the current key.
//!
//! A colon preceded by a backslash is never a separator. Values are stored raw.

use crate::yinl::ast::Block;
use crate::yinl::error::{IndentContext, MalformedBlockError, ParseWarning};
use crate::yinl::lexing::patterns::is_marker;
use crate::yinl::lexing::{first_unescaped_colon, infer_unit, measure, strip_columns};
use crate::yinl::parsing::{record_warning, ParseOptions};

/// What happens when a key appears twice in one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the first value and ignore the repeated key and its lines (header).
    KeepFirst,
    /// Replace the earlier value (footer).
    Overwrite,
}

struct OpenKey {
    key: String,
    /// Line of the `key:` opener.
    line: usize,
    /// False while skipping a duplicate under [`DuplicatePolicy::KeepFirst`].
    accepting: bool,
    /// Blank lines seen since the last value line; only kept if more values follow.
    pending_blanks: usize,
}

struct BlockBuilder {
    block: Block,
    policy: DuplicatePolicy,
    current: Option<OpenKey>,
}

impl BlockBuilder {
    fn open(&mut self, key: &str, number: usize, inline: Option<String>) {
        self.close();
        let accepting = match self.policy {
            DuplicatePolicy::KeepFirst if self.block.contains_key(key) => {
                log::debug!("{}: ignoring duplicate key '{}'", self.block.name, key);
                false
            }
            _ => {
                self.block.open_key(key);
                if let Some(value) = inline {
                    self.block.push_line(key, value, number);
                }
                true
            }
        };
        self.current = Some(OpenKey {
            key: key.to_string(),
            line: number,
            accepting,
            pending_blanks: 0,
        });
    }

    fn push_value(&mut self, line: String, number: usize) -> bool {
        let Some(open) = self.current.as_mut() else {
            return false;
        };
        if open.accepting {
            for offset in (1..=open.pending_blanks).rev() {
                self.block.push_line(&open.key, String::new(), number - offset);
            }
            self.block.push_line(&open.key, line, number);
        }
        open.pending_blanks = 0;
        true
    }

    fn push_blank(&mut self) {
        if let Some(open) = self.current.as_mut() {
            open.pending_blanks += 1;
        }
    }

    /// Close the current key, giving an empty `key:` its single empty line.
    fn close(&mut self) {
        if let Some(open) = self.current.take() {
            if open.accepting && self.block.lines(&open.key).is_empty() {
                self.block.push_line(&open.key, String::new(), open.line);
            }
        }
    }
}

/// Parse a block whose first non-blank line is `marker`.
///
/// `first_line` is the absolute line number of the block's first line, used in errors.
pub fn parse_block(
    text: &str,
    marker: &str,
    first_line: usize,
    policy: DuplicatePolicy,
    options: &ParseOptions,
    warnings: &mut Vec<ParseWarning>,
) -> Result<Block, MalformedBlockError> {
    let name = marker.trim_end_matches(':');
    let context = match policy {
        DuplicatePolicy::KeepFirst => IndentContext::Header,
        DuplicatePolicy::Overwrite => IndentContext::Footer,
    };

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (first_line + idx, line))
        .skip_while(|(_, line)| line.trim().is_empty());
    match lines.next() {
        Some((_, line)) if is_marker(line, marker) => {}
        _ => {
            return Err(MalformedBlockError::MissingMarker {
                expected: marker.to_string(),
            })
        }
    }
    let lines: Vec<(usize, &str)> = lines.collect();

    let widths: Vec<usize> = lines
        .iter()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(_, line)| measure(line, options.tab_width))
        .collect();
    let base = widths.iter().copied().min().unwrap_or(0);
    let inference = infer_unit(
        widths.iter().map(|w| w - base),
        options.default_indent_unit,
    );
    if inference.ambiguous {
        record_warning(
            warnings,
            ParseWarning::AmbiguousIndentation {
                context,
                unit: inference.unit,
                widths: inference.widths.clone(),
            },
        );
    }
    let unit = inference.unit;
    log::debug!("{name}: base indentation {base}, unit {unit}");

    let mut builder = BlockBuilder {
        block: Block::new(name),
        policy,
        current: None,
    };

    for (number, line) in lines {
        if line.trim().is_empty() {
            builder.push_blank();
            continue;
        }

        let relative = measure(line, options.tab_width) - base;
        if relative >= unit {
            let value = strip_columns(line, base + unit, options.tab_width).trim_end();
            if !builder.push_value(value.to_string(), number) {
                return Err(MalformedBlockError::ValueBeforeKey {
                    block: name.to_string(),
                    line: number,
                });
            }
            continue;
        }

        if let Some(open) = builder.current.as_mut() {
            open.pending_blanks = 0;
        }
        let content = line.trim();
        match first_unescaped_colon(content) {
            Some(0) if content.len() == 1 => {
                return Err(MalformedBlockError::EmptyKey {
                    block: name.to_string(),
                    line: number,
                });
            }
            Some(idx) if idx > 0 && idx == content.len() - 1 => {
                builder.open(content[..idx].trim_end(), number, None);
            }
            Some(idx) if idx > 0 => {
                let value = content[idx + 1..].trim().to_string();
                builder.open(content[..idx].trim_end(), number, Some(value));
            }
            _ => {
                if !builder.push_value(content.to_string(), number) {
                    return Err(MalformedBlockError::ValueBeforeKey {
                        block: name.to_string(),
                        line: number,
                    });
                }
            }
        }
    }
    builder.close();

    log::debug!("{name}: parsed {} keys", builder.block.len());
    Ok(builder.block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(text: &str, policy: DuplicatePolicy) -> Result<Block, MalformedBlockError> {
        let mut warnings = Vec::new();
        parse_block(
            text,
            "header:",
            1,
            policy,
            &ParseOptions::default(),
            &mut warnings,
        )
    }

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_one_line_values() {
        let block = parse(
            "header:\n    title: Demo\n    author: A. Author\n    date: 2024\n",
            DuplicatePolicy::KeepFirst,
        )
        .unwrap();
        assert_eq!(block.keys().collect::<Vec<_>>(), vec!["title", "author", "date"]);
        assert_eq!(block.first("title"), Some("Demo"));
        assert_eq!(block.first("date"), Some("2024"));
    }

    #[test]
    fn test_nested_values_keep_relative_indentation() {
        let text = "footer:\n    macros:\n        figure: (path)\n            ![](path)\n\n    shorthands:\n        eg: e.g.\n";
        let mut warnings = Vec::new();
        let block = parse_block(
            text,
            "footer:",
            10,
            DuplicatePolicy::Overwrite,
            &ParseOptions::default(),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(
            block.lines("macros"),
            lines(&["figure: (path)", "    ![](path)"]).as_slice()
        );
        assert_eq!(block.lines("shorthands"), lines(&["eg: e.g."]).as_slice());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_key_has_one_empty_line() {
        let block = parse("header:\n    citations:\n    title: x\n", DuplicatePolicy::KeepFirst)
            .unwrap();
        assert_eq!(block.lines("citations"), lines(&[""]).as_slice());
    }

    #[test]
    fn test_interior_blank_lines_are_kept() {
        let block = parse(
            "header:\n    abstract:\n        one\n\n        two\n\n\n    title: x\n",
            DuplicatePolicy::KeepFirst,
        )
        .unwrap();
        assert_eq!(block.lines("abstract"), lines(&["one", "", "two"]).as_slice());
    }

    #[test]
    fn test_value_lines_keep_source_line_numbers() {
        let text = "footer:\n    title: x\n    macros:\n        a: ()\n\n            body\n    citations:\n";
        let mut warnings = Vec::new();
        let block = parse_block(
            text,
            "footer:",
            20,
            DuplicatePolicy::Overwrite,
            &ParseOptions::default(),
            &mut warnings,
        )
        .unwrap();
        assert_eq!(block.line_numbers("title"), &[21]);
        assert_eq!(block.line_numbers("macros"), &[23, 24, 25]);
        assert_eq!(block.line_numbers("citations"), &[26]);
    }

    #[test]
    fn test_continuation_lines() {
        let block = parse(
            "header:\n    authors: A. Author,\n    B. Author\n",
            DuplicatePolicy::KeepFirst,
        )
        .unwrap();
        assert_eq!(
            block.lines("authors"),
            lines(&["A. Author,", "B. Author"]).as_slice()
        );
    }

    #[test]
    fn test_escaped_colon_is_not_a_separator() {
        let block = parse(
            "header:\n    title: Ratio 1\\:2\n    note\\: not a key\n",
            DuplicatePolicy::KeepFirst,
        )
        .unwrap();
        assert_eq!(
            block.lines("title"),
            lines(&["Ratio 1\\:2", "note\\: not a key"]).as_slice()
        );
    }

    #[rstest]
    #[case(DuplicatePolicy::KeepFirst, &["first", "more"])]
    #[case(DuplicatePolicy::Overwrite, &["second"])]
    fn test_duplicate_policy(#[case] policy: DuplicatePolicy, #[case] expected: &[&str]) {
        let block = parse(
            "header:\n    title: first\n    more\n    title: second\n",
            policy,
        )
        .unwrap();
        assert_eq!(block.lines("title"), lines(expected).as_slice());
    }

    #[test]
    fn test_value_before_key() {
        let err = parse("header:\n    stray value\n", DuplicatePolicy::KeepFirst).unwrap_err();
        assert_eq!(
            err,
            MalformedBlockError::ValueBeforeKey {
                block: "header".to_string(),
                line: 2
            }
        );
    }

    #[test]
    fn test_lone_colon_is_an_empty_key() {
        let err = parse("header:\n    title: x\n    :\n", DuplicatePolicy::KeepFirst).unwrap_err();
        assert!(matches!(err, MalformedBlockError::EmptyKey { line: 3, .. }));
    }

    #[test]
    fn test_missing_marker() {
        let err = parse("title: x\n", DuplicatePolicy::KeepFirst).unwrap_err();
        assert_eq!(
            err,
            MalformedBlockError::MissingMarker {
                expected: "header:".to_string()
            }
        );
    }

    #[test]
    fn test_two_space_blocks() {
        let block = parse(
            "header:\n  abstract:\n    short\n  title: Two\n",
            DuplicatePolicy::KeepFirst,
        )
        .unwrap();
        assert_eq!(block.lines("abstract"), lines(&["short"]).as_slice());
        assert_eq!(block.first("title"), Some("Two"));
    }
}
