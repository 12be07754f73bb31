// src/config/mod.rs
pub mod consts;
pub mod options;

use std::{fs, path::Path};

use crate::error::Result;
pub use options::{AppOptions, ExportOptions, FetchOptions, Format};

/// Parse options from YAML. Keys left out keep their defaults.
pub fn from_yaml(text: &str) -> Result<AppOptions> {
    if text.trim().is_empty() {
        return Ok(AppOptions::default());
    }
    Ok(serde_yaml::from_str(text)?)
}

/// Load options from a YAML file on disk.
pub fn load(path: &Path) -> Result<AppOptions> {
    let text = fs::read_to_string(path)?;
    from_yaml(&text)
}
