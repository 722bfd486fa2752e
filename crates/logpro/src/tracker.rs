//! Per-process record of which files have been truncated already

use logpro_core::WriteMode;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Files initialized (truncated) during this process lifetime.
///
/// Grows monotonically; never persisted.
#[derive(Debug, Default)]
pub struct WriteTracker {
    initialized: HashSet<PathBuf>,
}

impl WriteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide how to open `path` for the next write.
    ///
    /// Persistent entries always append. Ephemeral entries are truncated
    /// when forced, when the file is missing, or on the first write this
    /// process makes to the path.
    pub fn mode_for(&self, path: &Path, persistent: bool, force_overwrite: bool) -> WriteMode {
        if persistent {
            return WriteMode::Append;
        }
        if force_overwrite || !path.exists() || !self.initialized.contains(path) {
            WriteMode::Overwrite
        } else {
            WriteMode::Append
        }
    }

    /// Record an overwrite. Returns `true` the first time a path is seen.
    pub fn mark_initialized(&mut self, path: &Path) -> bool {
        self.initialized.insert(path.to_path_buf())
    }
}
