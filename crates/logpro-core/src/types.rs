//! Shared value types and naming rules

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Error, Result};

/// How a log file is opened for a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate, then write
    Overwrite,
    /// Append to existing content
    Append,
}

/// Options for a single log write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteOptions {
    /// Target file name; `.txt` is appended when it has no `.`
    pub filename: String,
    /// Keep the entry across restarts (stored as `persistent_<name>`)
    pub persistent: bool,
    /// Prefix the entry with a `[timestamp]` line
    pub show_timestamp: bool,
    /// Blank lines written after the entry
    pub blank_lines: usize,
    /// Relative folder under the ephemeral root; ignored for persistent entries
    pub subfolder: Option<String>,
    /// Truncate on every write; when off, only the first write per process truncates
    pub force_overwrite: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            persistent: false,
            show_timestamp: false,
            blank_lines: DEFAULT_BLANK_LINES,
            subfolder: None,
            force_overwrite: true,
        }
    }
}

impl WriteOptions {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    pub fn show_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    pub fn blank_lines(mut self, lines: usize) -> Self {
        self.blank_lines = lines;
        self
    }

    pub fn subfolder(mut self, folder: impl Into<String>) -> Self {
        self.subfolder = Some(folder.into());
        self
    }

    pub fn force_overwrite(mut self, force: bool) -> Self {
        self.force_overwrite = force;
        self
    }
}

/// Append the default extension when the name has no `.`
pub fn with_default_extension(filename: &str) -> String {
    if filename.contains('.') {
        filename.to_string()
    } else {
        format!("{}.{}", filename, DEFAULT_EXTENSION)
    }
}

pub fn is_persistent_name(name: &str) -> bool {
    name.starts_with(PERSISTENT_PREFIX)
}

pub fn is_ephemeral_name(name: &str) -> bool {
    name.starts_with(EPHEMERAL_PREFIX)
}

/// Names skipped by migration and purges
pub fn is_reserved_name(name: &str) -> bool {
    is_persistent_name(name) || is_ephemeral_name(name)
}

/// Apply the persistent marker exactly once
pub fn persistent_name(filename: &str) -> String {
    if is_persistent_name(filename) {
        filename.to_string()
    } else {
        format!("{}{}", PERSISTENT_PREFIX, filename)
    }
}

/// Extract the owning pid from a `temp_<pid>` directory name
pub fn parse_ephemeral_pid(name: &str) -> Result<u32> {
    let digits = name
        .strip_prefix(EPHEMERAL_PREFIX)
        .ok_or_else(|| Error::InvalidEphemeralName(name.to_string()))?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidEphemeralName(name.to_string()));
    }
    match digits.parse::<u32>() {
        Ok(pid) if pid > 0 => Ok(pid),
        _ => Err(Error::InvalidEphemeralName(name.to_string())),
    }
}
