//! YAML serialization of the whole document structure.

use super::registry::{FormatError, Formatter};
use crate::yinl::ast::Document;

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_yaml::to_string(doc).map_err(|err| FormatError::Serialization(err.to_string()))
    }

    fn description(&self) -> &str {
        "Document structure as YAML"
    }

    fn file_extension(&self) -> &str {
        "yaml"
    }
}
