//! Macro element
//!
//! A macro is a named template with a fixed list of formal parameters. Its body is stored as data
//! only: literal segments interleaved with parameter references. Expansion is plain substitution,
//! with no control flow and no access to anything outside the arguments.

use crate::yinl::error::MacroError;
use crate::yinl::lexing::find_macro_calls;
use linked_hash_map::LinkedHashMap;
use serde::Serialize;

/// One piece of a compiled macro body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Segment {
    Literal(String),
    /// Index into the macro's parameter list.
    Param(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Macro {
    pub name: String,
    pub params: Vec<String>,
    pub template: Vec<Segment>,
}

impl Macro {
    /// Expand with `args`, which must match the parameter list in length.
    pub fn expand(&self, args: &[&str], section: &str) -> Result<String, MacroError> {
        if args.len() != self.params.len() {
            return Err(MacroError::ArityMismatch {
                name: self.name.clone(),
                expected: self.params.len(),
                found: args.len(),
                section: section.to_string(),
            });
        }
        let mut out = String::new();
        for segment in &self.template {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Param(idx) => out.push_str(args[*idx]),
            }
        }
        Ok(out)
    }

    /// The body with parameter references written back as their names.
    pub fn body(&self) -> String {
        self.template
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Param(idx) => self.params[*idx].as_str(),
            })
            .collect()
    }
}

/// Macros by name, in definition order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MacroTable {
    macros: LinkedHashMap<String, Macro>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `definition`, replacing (and returning) any macro of the same name.
    pub fn insert(&mut self, definition: Macro) -> Option<Macro> {
        self.macros.insert(definition.name.clone(), definition)
    }

    pub fn get(&self, name: &str) -> Option<&Macro> {
        self.macros.get(name)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Macro> {
        self.macros.values()
    }

    /// Expand every macro call in `text`.
    ///
    /// Unresolvable calls are left in place and reported; the rest of the text is still
    /// substituted. Expanded output is not scanned again.
    pub fn substitute(&self, text: &str, section: &str) -> (String, Vec<MacroError>) {
        let mut out = String::with_capacity(text.len());
        let mut errors = Vec::new();
        let mut cursor = 0;

        for call in find_macro_calls(text) {
            out.push_str(&text[cursor..call.span.start]);
            let expansion = match self.get(call.name) {
                Some(definition) => definition.expand(&call.args, section),
                None => Err(MacroError::UnknownMacro {
                    name: call.name.to_string(),
                    section: section.to_string(),
                }),
            };
            match expansion {
                Ok(expanded) => out.push_str(&expanded),
                Err(err) => {
                    log::warn!("{err}");
                    out.push_str(&text[call.span.clone()]);
                    errors.push(err);
                }
            }
            cursor = call.span.end;
        }
        out.push_str(&text[cursor..]);
        (out, errors)
    }
}
