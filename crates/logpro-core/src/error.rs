//! Error types for logpro

use std::path::{Path, PathBuf};

/// logpro error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to {action} {path}: {source}")]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Liveness probe failed for pid {pid}: {reason}")]
    Probe { pid: u32, reason: String },

    #[error("Not an ephemeral directory name: {0}")]
    InvalidEphemeralName(String),

    #[error("Reserved name cannot be used for an ephemeral entry: {0}")]
    ReservedName(String),

    #[error("Subfolder must stay inside the ephemeral root: {0}")]
    InvalidSubfolder(String),
}

/// Result type alias for logpro
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn fs(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Error::Filesystem {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn probe<S: Into<String>>(pid: u32, reason: S) -> Self {
        Error::Probe {
            pid,
            reason: reason.into(),
        }
    }
}
