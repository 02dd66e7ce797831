//! JSON serialization of the whole document structure.

use super::registry::{FormatError, Formatter};
use crate::yinl::ast::Document;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|err| FormatError::Serialization(err.to_string()))
    }

    fn description(&self) -> &str {
        "Document structure as JSON"
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
