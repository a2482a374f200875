use crate::context::Context;
use crate::error::Error;
use crate::log::Reporter;
use crate::result::Result;
use crate::target::ArchiveTarget;
use crate::utils;
use std::fs::{self, File, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use walkdir::{DirEntry, WalkDir};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Entries at or above this size need the ZIP64 extension
const LARGE_FILE_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Root prefix applied to every entry name, decided once before the walk
#[derive(Debug, Clone, PartialEq, Eq)]
enum BaseDir {
    /// Source is a single file: wrap it in a folder named after it
    SingleFile(String),
    /// Source is a directory: names are relative to it, no wrapper
    DirectoryRoot,
}

impl BaseDir {
    fn detect(source: &Path) -> Result<Self> {
        if fs::metadata(source)?.is_dir() {
            return Ok(BaseDir::DirectoryRoot);
        }

        let name = source
            .file_name()
            .ok_or_else(|| Error::config(format!("{} has no file name", source.display())))?;
        let name = name.to_str().ok_or_else(|| Error::NonUtf8Name {
            path: source.to_path_buf(),
        })?;
        Ok(BaseDir::SingleFile(name.to_string()))
    }

    /// The directory root would map to an empty name, so it is not visited
    fn min_depth(&self) -> usize {
        match self {
            BaseDir::SingleFile(_) => 0,
            BaseDir::DirectoryRoot => 1,
        }
    }

    fn entry_name(&self, source: &Path, path: &Path, is_dir: bool) -> Result<String> {
        let relative = path.strip_prefix(source).map_err(|_| {
            Error::custom(format!(
                "{} is not inside {}",
                path.display(),
                source.display()
            ))
        })?;

        let relative = utils::archive_name(relative).ok_or_else(|| Error::NonUtf8Name {
            path: path.to_path_buf(),
        })?;

        let mut name = match self {
            BaseDir::SingleFile(base) if relative.is_empty() => format!("{base}/{base}"),
            BaseDir::SingleFile(base) => format!("{base}/{relative}"),
            BaseDir::DirectoryRoot => relative,
        };

        if is_dir {
            name.push('/');
        }
        Ok(name)
    }
}

/// A filesystem node visited during the walk
struct SourceNode {
    /// Position in the tree, used for the entry name
    path: PathBuf,
    /// Real location when `path` is a symbolic link
    resolved: Option<PathBuf>,
    /// Metadata of the resolved node
    metadata: Metadata,
}

impl SourceNode {
    fn from_entry(entry: &DirEntry) -> Result<Self> {
        let path = entry.path().to_path_buf();

        if entry.path_is_symlink() {
            let resolved = fs::canonicalize(&path).map_err(|source| Error::Symlink {
                path: path.clone(),
                source,
            })?;
            let metadata = fs::metadata(&resolved)?;
            return Ok(Self {
                path,
                resolved: Some(resolved),
                metadata,
            });
        }

        let metadata = entry.metadata()?;
        Ok(Self {
            path,
            resolved: None,
            metadata,
        })
    }

    /// Sockets, FIFOs and devices have no finite content to archive
    fn ensure_supported(&self) -> Result<()> {
        if self.metadata.is_dir() || self.metadata.is_file() {
            return Ok(());
        }
        Err(Error::UnsupportedFile {
            path: self.path.clone(),
        })
    }

    fn content_path(&self) -> &Path {
        self.resolved.as_deref().unwrap_or(&self.path)
    }

    fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    fn options(&self) -> SimpleFileOptions {
        let method = if self.is_dir() {
            CompressionMethod::Stored
        } else {
            CompressionMethod::Deflated
        };

        let options = SimpleFileOptions::default()
            .compression_method(method)
            .last_modified_time(modified_time(&self.metadata))
            .large_file(!self.is_dir() && self.metadata.len() >= LARGE_FILE_THRESHOLD);

        #[cfg(unix)]
        let options = {
            use std::os::unix::fs::PermissionsExt;
            options.unix_permissions(self.metadata.permissions().mode())
        };

        options
    }
}

/// Compress `source` into a ZIP archive at `destination`.
///
/// The `.zip` extension is appended to `destination` when missing and its
/// parent directory is created on demand. Returns the absolute path of the
/// written archive. The first error aborts the run; bytes already written
/// are left on disk.
pub fn build(
    ctx: &Context,
    log: &mut dyn Reporter,
    source: &Path,
    destination: &Path,
) -> Result<PathBuf> {
    let target = ArchiveTarget::prepare(destination, log)?;
    let base = BaseDir::detect(source)?;

    if ctx.verbose {
        log.info(&format!(
            "Writing {} ({})",
            target.path.display(),
            target.state
        ));
    }

    // Dropping the writer on an error path still finalizes the archive
    let mut zip = ZipWriter::new(File::create(&target.path)?);
    let archive = fs::canonicalize(&target.path)?;

    let walker = WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .min_depth(base.min_depth());

    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        if is_archive(&entry, &archive) {
            continue;
        }

        let node = SourceNode::from_entry(&entry)?;
        node.ensure_supported()?;
        let name = base.entry_name(source, &node.path, node.is_dir())?;

        if ctx.verbose {
            log.info(&format!("Adding {}", name));
        }

        write_entry(&mut zip, &node, name)?;
    }

    let file = zip.finish()?;
    file.sync_all()?;

    Ok(target.path)
}

fn write_entry(zip: &mut ZipWriter<File>, node: &SourceNode, name: String) -> Result<()> {
    let options = node.options();

    if node.is_dir() {
        zip.add_directory(name, options)?;
        return Ok(());
    }

    zip.start_file(name, options)?;
    let mut file = File::open(node.content_path())?;
    io::copy(&mut file, zip)?;
    Ok(())
}

/// Whether `entry` is the archive currently being written
fn is_archive(entry: &DirEntry, archive: &Path) -> bool {
    entry.file_type().is_file()
        && entry.file_name() == archive.file_name().unwrap_or_default()
        && fs::canonicalize(entry.path()).is_ok_and(|path| path == archive)
}

fn modified_time(metadata: &Metadata) -> DateTime {
    metadata
        .modified()
        .ok()
        .and_then(|time| DateTime::try_from(OffsetDateTime::from(time)).ok())
        .unwrap_or_default()
}

/// Broken links and link cycles surface from walkdir; report them as
/// symlink resolution failures
fn walk_error(err: walkdir::Error) -> Error {
    let Some(path) = err.path().map(Path::to_path_buf) else {
        return Error::Walk(err);
    };

    if err.loop_ancestor().is_some() {
        return Error::Symlink {
            path,
            source: io::Error::other(err.to_string()),
        };
    }

    let is_link = fs::symlink_metadata(&path).is_ok_and(|m| m.file_type().is_symlink());
    if is_link {
        let source = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("unresolvable link"));
        return Error::Symlink { path, source };
    }

    Error::Walk(err)
}
