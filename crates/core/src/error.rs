use std::path::PathBuf;
use thiserror::Error;

/// Failure that aborts a whole resolution call.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Malformed namespace path `{path}`: {reason}")]
    MalformedPath { path: String, reason: &'static str },
    #[error("I/O error on lookup root {}: {source}", .path.display())]
    Location {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unreadable archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("Directory walk failed under {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Failure to resolve one fully-qualified name to a loaded type.
///
/// Never fatal to a scan: the offending entry is skipped and the error is
/// kept in the [`ScanReport`](crate::ScanReport).
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Type not found: {0}")]
    NotFound(String),
    #[error("Malformed compiled unit {name}: {reason}")]
    Malformed { name: String, reason: String },
    #[error("I/O error loading {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        LoadError::Malformed {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
