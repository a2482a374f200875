use crate::result::Result;
use std::fs;
use std::path::{Component, Path};

/// Ensure a directory exists, creating it if necessary.
///
/// Returns `true` when the directory (or any of its ancestors) had to be created.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path)?;
    Ok(true)
}

/// Join the normal components of `path` with forward slashes.
///
/// Returns `None` if any component is not valid UTF-8.
pub fn archive_name(path: &Path) -> Option<String> {
    let parts = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}
