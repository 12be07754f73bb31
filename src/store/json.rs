// src/store/json.rs
use crate::{config::Format, document::Document, error::Result};

use super::DocumentStore;

/// Pretty JSON, two-space indent. Chapter and passage keys are numeric strings.
pub struct JsonStore;

impl DocumentStore for JsonStore {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode(&self, doc: &Document) -> Result<String> {
        let mut text = serde_json::to_string_pretty(doc)?;
        text.push('\n');
        Ok(text)
    }

    fn decode(&self, text: &str) -> Result<Option<Document>> {
        Ok(Some(serde_json::from_str(text.trim_start_matches('\u{feff}'))?))
    }
}
