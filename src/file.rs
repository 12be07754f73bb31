// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!("Path exists but is not a directory: {}", dir.display())));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Create the parent directory of `path` when it has one.
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect()
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

/// Resolve a user-supplied output location.
/// Empty -> `default_path`; an existing directory or a trailing separator -> file inside it.
pub fn resolve_out_path(user_o: &str, default_path: &Path) -> io::Result<PathBuf> {
    if user_o.is_empty() { return Ok(default_path.to_path_buf()); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(&p) || p.is_dir() {
        ensure_directory(&p)?;
        let name = default_path.file_name().unwrap_or(default_path.as_os_str());
        Ok(p.join(name))
    } else {
        Ok(p)
    }
}
