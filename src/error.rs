use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Custom(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to resolve symbolic link {}: {source}", path.display())]
    Symlink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("entry name is not valid UTF-8: {}", path.display())]
    NonUtf8Name { path: PathBuf },

    #[error("unsupported file type (not a regular file or directory): {}", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    pub fn custom<T: Into<String>>(msg: T) -> Self {
        Error::Custom(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Error::Config(msg.into())
    }
}
