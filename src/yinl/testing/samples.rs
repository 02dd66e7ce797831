//! Curated sample documents, embedded at compile time.

use crate::yinl::ast::Document;
use crate::yinl::parsing::parse_document;

const SAMPLES: &[(&str, &str)] = &[
    ("demo.yi", include_str!("../../../samples/demo.yi")),
    ("paper.yi", include_str!("../../../samples/paper.yi")),
    ("two-space.yi", include_str!("../../../samples/two-space.yi")),
    ("warnings.yi", include_str!("../../../samples/warnings.yi")),
];

pub struct Samples;

impl Samples {
    pub fn names() -> impl Iterator<Item = &'static str> {
        SAMPLES.iter().map(|(name, _)| *name)
    }

    pub fn get(name: &str) -> Option<&'static str> {
        SAMPLES
            .iter()
            .find(|(sample, _)| *sample == name)
            .map(|(_, source)| *source)
    }

    /// Source of `name`. Panics if there is no such sample.
    pub fn source(name: &str) -> &'static str {
        match Self::get(name) {
            Some(source) => source,
            None => panic!("unknown sample '{name}', available: {:?}", Self::names().collect::<Vec<_>>()),
        }
    }

    /// Parse `name`. Panics if the sample is missing or fails to parse.
    pub fn parse(name: &str) -> Document {
        match parse_document(Self::source(name)) {
            Ok(doc) => doc,
            Err(err) => panic!("sample '{name}' failed to parse: {err}"),
        }
    }
}
