use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ExecutionError {
    #[error("file not found: {path}: {source}")]
    FileNotFound {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("File Read Error: {path}: {source}")]
    FileRead {
        path: PathBuf,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },
}

impl ExecutionError {
    /// Classify an I/O failure while reading a user-supplied file.
    #[track_caller]
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let location = ErrorLocation::from(Location::caller());

        if source.kind() == std::io::ErrorKind::NotFound {
            ExecutionError::FileNotFound {
                path,
                location,
                source,
            }
        } else {
            ExecutionError::FileRead {
                path,
                location,
                source,
            }
        }
    }

    pub fn location(&self) -> &ErrorLocation {
        match self {
            ExecutionError::FileNotFound { location, .. }
            | ExecutionError::FileRead { location, .. } => location,
        }
    }
}
