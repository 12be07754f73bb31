// src/store/mod.rs
//
// Persistence of documents. One store per file format; callers pick one by
// format or by file extension.

pub mod csv;
pub mod json;
pub mod xml;
pub mod yaml;

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{config::Format, document::Document, error::Result, file};

pub use self::{csv::DelimitedStore, json::JsonStore, xml::XmlStore, yaml::YamlStore};

pub trait DocumentStore: Send + Sync {
    fn format(&self) -> Format;

    fn encode(&self, doc: &Document) -> Result<String>;

    /// `None` when the text holds no document.
    fn decode(&self, text: &str) -> Result<Option<Document>>;

    /// Write `doc` to `path`, creating parent directories. Returns the path written.
    fn write(&self, path: &Path, doc: &Document) -> Result<PathBuf> {
        file::ensure_parent(path)?;
        fs::write(path, self.encode(doc)?)?;
        info!(path = %path.display(), format = self.format().ext(), "document written");
        Ok(path.to_path_buf())
    }

    /// `None` when the file is missing or blank.
    fn read(&self, path: &Path) -> Result<Option<Document>> {
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        if text.trim_start_matches('\u{feff}').trim().is_empty() {
            return Ok(None);
        }
        self.decode(&text)
    }

    fn extension(&self) -> &'static str {
        self.format().ext()
    }
}

pub fn for_format(format: Format) -> Box<dyn DocumentStore> {
    match format {
        Format::Json => Box::new(JsonStore),
        Format::Yaml => Box::new(YamlStore),
        Format::Xml => Box::new(XmlStore),
        Format::Csv => Box::new(DelimitedStore::csv()),
        Format::Tsv => Box::new(DelimitedStore::tsv()),
    }
}

/// Store matching the extension of `path`, if any.
pub fn for_path(path: &Path) -> Option<Box<dyn DocumentStore>> {
    let ext = path.extension()?.to_str()?;
    Format::from_ext(ext).map(for_format)
}
