// src/config/options.rs
use std::path::PathBuf;

use serde::Deserialize;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub translation: String,
    pub fetch: FetchOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            translation: s!(DEFAULT_TRANSLATION),
            fetch: FetchOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

/// Switches that shape how passages are fetched and rendered.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub show_passage_numbers: bool,
    pub output_as_list: bool,
    /// Trim each passage. Applies to list output and to downloaded documents.
    pub strip_excess_whitespace: bool,
    pub use_concurrency: bool,
    pub use_ascii_punctuation: bool,
    pub workers: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            show_passage_numbers: true,
            output_as_list: false,
            strip_excess_whitespace: false,
            use_concurrency: true,
            use_ascii_punctuation: false,
            workers: WORKERS,
        }
    }
}

impl FetchOptions {
    /// Pool size actually used for `units` fetches.
    pub fn worker_count(&self, units: usize) -> usize {
        self.workers.min(units).max(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
    Xml,
    Csv,
    Tsv,
}

impl Format {
    pub fn ext(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Xml  => "xml",
            Format::Csv  => "csv",
            Format::Tsv  => "tsv",
        }
    }

    /// Guess from a file extension (case-insensitive). `yml` counts as YAML.
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "xml" => Some(Format::Xml),
            "csv" => Some(Format::Csv),
            "tsv" => Some(Format::Tsv),
            _ => None,
        }
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::from_ext(s).ok_or_else(|| format!("Unknown format: {s}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub format: Format,
    pub out_dir: PathBuf,
    /// Explicit target file; overrides `<out_dir>/<Book>.<ext>`.
    pub out_file: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: Format::Json,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            out_file: None,
        }
    }
}

impl ExportOptions {
    /// Where a document for `book` lands.
    pub fn out_path(&self, book: &str) -> PathBuf {
        match &self.out_file {
            Some(p) => p.clone(),
            None => self.out_dir.join(join!(book, ".", self.format.ext())),
        }
    }
}
