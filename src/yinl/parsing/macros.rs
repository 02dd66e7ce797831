//! Macro Compiler
//!
//! Turns the value lines of the footer's `macros` key into a [`MacroTable`]. Inside that block an
//! unindented `name: (a, b)` line opens a definition and the deeper lines that follow are its
//! body. The body is compiled into literal segments and parameter references; every whole-word
//! occurrence of a parameter name is a reference.

use crate::yinl::ast::{Macro, MacroTable, Segment};
use crate::yinl::error::{IndentContext, MalformedBlockError, ParseWarning};
use crate::yinl::lexing::patterns::{macro_header, split_args};
use crate::yinl::lexing::{infer_unit, measure, strip_columns};
use crate::yinl::parsing::{record_warning, ParseOptions};
use regex::Regex;

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_params(name: &str, raw: &str) -> Result<Vec<String>, MalformedBlockError> {
    let mut params: Vec<String> = Vec::new();
    for param in split_args(raw) {
        if !is_identifier(param) || params.iter().any(|p| p == param) {
            return Err(MalformedBlockError::InvalidParameter {
                macro_name: name.to_string(),
                parameter: param.to_string(),
            });
        }
        params.push(param.to_string());
    }
    Ok(params)
}

/// Compile `body` into segments, treating whole-word occurrences of `params` as references.
pub fn compile_template(
    name: &str,
    body: &str,
    params: &[String],
) -> Result<Vec<Segment>, MalformedBlockError> {
    if params.is_empty() {
        return Ok(if body.is_empty() {
            Vec::new()
        } else {
            vec![Segment::Literal(body.to_string())]
        });
    }

    // Longest names first so that `caption` is not matched as `cap`.
    let mut by_length: Vec<&String> = params.iter().collect();
    by_length.sort_by_key(|p| std::cmp::Reverse(p.len()));
    let alternation = by_length
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = Regex::new(&format!(r"\b(?:{alternation})\b")).map_err(|_| {
        MalformedBlockError::InvalidParameter {
            macro_name: name.to_string(),
            parameter: params.join(", "),
        }
    })?;

    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(body) {
        if found.start() > cursor {
            segments.push(Segment::Literal(body[cursor..found.start()].to_string()));
        }
        if let Some(idx) = params.iter().position(|p| p == found.as_str()) {
            segments.push(Segment::Param(idx));
        }
        cursor = found.end();
    }
    if cursor < body.len() {
        segments.push(Segment::Literal(body[cursor..].to_string()));
    }
    Ok(segments)
}

struct Definition {
    name: String,
    params: Vec<String>,
    body: Vec<String>,
}

impl Definition {
    fn compile(mut self) -> Result<Macro, MalformedBlockError> {
        while self.body.last().is_some_and(|line| line.is_empty()) {
            self.body.pop();
        }
        let body = self.body.join("\n");
        let template = compile_template(&self.name, &body, &self.params)?;
        Ok(Macro {
            name: self.name,
            params: self.params,
            template,
        })
    }
}

fn finish(table: &mut MacroTable, definition: Option<Definition>) -> Result<(), MalformedBlockError> {
    if let Some(definition) = definition {
        let compiled = definition.compile()?;
        if let Some(previous) = table.insert(compiled) {
            log::warn!("macro '{}' is defined more than once; the last definition wins", previous.name);
        }
    }
    Ok(())
}

/// Compile the `macros` value lines.
///
/// `line_numbers` holds the source line of each entry in `lines` and is used in errors; without
/// it errors fall back to the 1-based position within `lines`.
pub fn compile_macros(
    lines: &[String],
    line_numbers: &[usize],
    options: &ParseOptions,
    warnings: &mut Vec<ParseWarning>,
) -> Result<MacroTable, MalformedBlockError> {
    let mut table = MacroTable::new();

    let widths: Vec<usize> = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| measure(line, options.tab_width))
        .collect();
    let Some(base) = widths.iter().copied().min() else {
        return Ok(table);
    };
    let inference = infer_unit(widths.iter().map(|w| w - base), options.default_indent_unit);
    if inference.ambiguous {
        record_warning(
            warnings,
            ParseWarning::AmbiguousIndentation {
                context: IndentContext::Macros,
                unit: inference.unit,
                widths: inference.widths.clone(),
            },
        );
    }
    let unit = inference.unit;

    let mut current: Option<Definition> = None;
    for (idx, line) in lines.iter().enumerate() {
        let number = line_numbers.get(idx).copied().unwrap_or(idx + 1);
        if line.trim().is_empty() {
            if let Some(definition) = current.as_mut() {
                definition.body.push(String::new());
            }
            continue;
        }

        let relative = measure(line, options.tab_width) - base;
        if relative == 0 {
            finish(&mut table, current.take())?;
            let header = strip_columns(line, base, options.tab_width).trim_end();
            let (name, raw_params) =
                macro_header(header).ok_or_else(|| MalformedBlockError::InvalidMacroHeader {
                    line: number,
                    text: header.to_string(),
                })?;
            current = Some(Definition {
                name: name.to_string(),
                params: parse_params(name, raw_params)?,
                body: Vec::new(),
            });
        } else {
            let definition = current
                .as_mut()
                .ok_or_else(|| MalformedBlockError::ValueBeforeKey {
                    block: "macros".to_string(),
                    line: number,
                })?;
            let body_line = strip_columns(line, base + unit, options.tab_width).trim_end();
            definition.body.push(body_line.to_string());
        }
    }
    finish(&mut table, current)?;

    log::debug!("compiled {} macros", table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(lines: &[&str]) -> Result<MacroTable, MalformedBlockError> {
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        compile_macros(&lines, &[], &ParseOptions::default(), &mut Vec::new())
    }

    #[test]
    fn test_compile_definitions() {
        let table = compile(&[
            "anchor: (tag)",
            "    <a id=\"tag\"></a>",
            "figure: (path, caption)",
            "    ![caption](path)",
            "",
            "    *caption*",
        ])
        .unwrap();
        assert_eq!(table.len(), 2);

        let anchor = table.get("anchor").unwrap();
        assert_eq!(anchor.params, vec!["tag"]);
        assert_eq!(
            anchor.expand(&["why-yinl"], "Intro").unwrap(),
            "<a id=\"why-yinl\"></a>"
        );

        let figure = table.get("figure").unwrap();
        assert_eq!(
            figure.expand(&["img.png", "Figure 1"], "Intro").unwrap(),
            "![Figure 1](img.png)\n\n*Figure 1*"
        );
    }

    #[test]
    fn test_template_prefers_longest_parameter() {
        let params = vec!["cap".to_string(), "caption".to_string()];
        let segments = compile_template("m", "caption cap", &params).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Param(1),
                Segment::Literal(" ".to_string()),
                Segment::Param(0),
            ]
        );
    }

    #[test]
    fn test_template_ignores_partial_words() {
        let params = vec!["path".to_string()];
        let segments = compile_template("m", "pathway path", &params).unwrap();
        assert_eq!(
            segments,
            vec![Segment::Literal("pathway ".to_string()), Segment::Param(0)]
        );
    }

    #[test]
    fn test_zero_parameter_macro() {
        let table = compile(&["sig: ()", "    -- the authors"]).unwrap();
        assert_eq!(table.get("sig").unwrap().expand(&[], "End").unwrap(), "-- the authors");
    }

    #[test]
    fn test_later_definition_wins() {
        let table = compile(&["m: (x)", "    one x", "m: (x)", "    two x"]).unwrap();
        assert_eq!(table.get("m").unwrap().expand(&["!"], "s").unwrap(), "two !");
    }

    #[test]
    fn test_invalid_header() {
        let err = compile(&["not a macro", "    body"]).unwrap_err();
        assert_eq!(
            err,
            MalformedBlockError::InvalidMacroHeader {
                line: 1,
                text: "not a macro".to_string()
            }
        );
    }

    #[test]
    fn test_body_before_header() {
        let err = compile(&["    body", "m: (x)"]).unwrap_err();
        assert!(matches!(err, MalformedBlockError::ValueBeforeKey { line: 1, .. }));
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            compile(&["m: (a, a)"]).unwrap_err(),
            MalformedBlockError::InvalidParameter { .. }
        ));
        assert!(matches!(
            compile(&["m: (a b)"]).unwrap_err(),
            MalformedBlockError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn test_empty_block() {
        assert!(compile(&[""]).unwrap().is_empty());
        assert!(compile(&[]).unwrap().is_empty());
    }
}
