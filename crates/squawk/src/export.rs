//! Track writers.

pub mod ass;

use std::{fmt, io, path::PathBuf};

use crate::assemble::Track;

/// A sink for compiled tracks.
pub trait Exporter {
    fn export_track(&self, track: &Track) -> Result<(), Error>;
}

#[derive(Debug)]
pub enum Error {
    /// The destination cannot hold a track file.
    InvalidPath(PathBuf),
    /// Writing the destination or its temporary file failed.
    Io { path: PathBuf, source: io::Error },
}

impl Error {
    fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath(path) => {
                write!(f, "output path `{}` does not name a file", path.display())
            }
            Self::Io { path, source } => write!(f, "cannot write `{}`: {source}", path.display()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPath(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}
