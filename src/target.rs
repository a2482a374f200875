use crate::log::Reporter;
use crate::result::Result;
use crate::utils;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File extension every archive path ends with
pub const EXTENSION: &str = "zip";

/// What was found on disk while preparing the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    /// A file already existed and will be overwritten
    Existing,
    /// The parent directory was present, the file was not
    New,
    /// The parent directory had to be created
    ParentCreated,
}

impl std::fmt::Display for TargetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self {
            TargetState::Existing => "overwriting existing file",
            TargetState::New => "new file",
            TargetState::ParentCreated => "new directory",
        };
        write!(f, "{}", state)
    }
}

/// Normalized archive destination
#[derive(Debug, Clone)]
pub struct ArchiveTarget {
    /// Absolute path, always ending in `.zip`
    pub path: PathBuf,
    pub state: TargetState,
}

impl ArchiveTarget {
    /// Normalize `destination`, create its parent directory and warn about
    /// anything that is about to be overwritten.
    pub fn prepare(destination: &Path, log: &mut dyn Reporter) -> Result<Self> {
        let path = std::path::absolute(with_zip_extension(destination))?;

        let mut state = TargetState::New;
        if let Some(parent) = path.parent()
            && utils::ensure_dir(parent)?
        {
            log.warn(&format!(
                "Target directory {} did not exist and was created",
                parent.display()
            ));
            state = TargetState::ParentCreated;
        }

        if path.exists() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            log.warn(&format!(
                "The {} already exists at location: {}",
                name,
                path.display()
            ));
            state = TargetState::Existing;
        }

        Ok(Self { path, state })
    }
}

/// Append `.zip` unless the path already ends with it
pub fn with_zip_extension(destination: &Path) -> PathBuf {
    let has_extension = destination
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(EXTENSION));

    if has_extension {
        return destination.to_path_buf();
    }

    let mut path = OsString::from(destination.as_os_str());
    path.push(".");
    path.push(EXTENSION);
    PathBuf::from(path)
}
