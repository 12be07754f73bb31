// src/store/yaml.rs
use crate::{config::Format, document::Document, error::Result};

use super::DocumentStore;

pub struct YamlStore;

impl DocumentStore for YamlStore {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn encode(&self, doc: &Document) -> Result<String> {
        Ok(serde_yaml::to_string(doc)?)
    }

    fn decode(&self, text: &str) -> Result<Option<Document>> {
        // A YAML file that is only `~` or comments deserializes to None
        Ok(serde_yaml::from_str::<Option<Document>>(text)?)
    }
}
