// src/lib.rs

#[macro_use]
pub mod macros;

pub mod assemble;
pub mod config;
pub mod core;
pub mod document;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod file;
pub mod log;
pub mod omission;
pub mod progress;
pub mod range;
pub mod scrape;
pub mod source;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use document::Document;
pub use downloader::Downloader;
pub use error::{Error, Result};
pub use extractor::{Extractor, FileExtractor};
