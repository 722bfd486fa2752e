//! Constants and default values for logpro

use std::path::{Path, PathBuf};

/// Name of the log directory created under the working directory
pub const LOG_DIR_NAME: &str = "logProLog";

/// Prefix marking a file that survives restarts
pub const PERSISTENT_PREFIX: &str = "persistent_";

/// Prefix of a per-process ephemeral directory (`temp_<pid>`)
pub const EPHEMERAL_PREFIX: &str = "temp_";

/// File written to when no filename is given
pub const DEFAULT_FILENAME: &str = "default.txt";

/// Extension appended to filenames without a `.`
pub const DEFAULT_EXTENSION: &str = "txt";

/// Blank lines written after each entry
pub const DEFAULT_BLANK_LINES: usize = 1;

/// Boolean-like switch that turns the whole facility off
pub const PRODUCTION_ENV: &str = "LOGPRO_PRODUCTION";

/// Alternative switch, production when set to `production`
pub const ENVIRONMENT_ENV: &str = "LOGPRO_ENV";

/// Timestamp line format (UTC, millisecond precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Get the persistent log root under a base directory
pub fn log_root(base_dir: &Path) -> PathBuf {
    base_dir.join(LOG_DIR_NAME)
}

/// Get the ephemeral directory name for a process id
pub fn ephemeral_dir_name(pid: u32) -> String {
    format!("{}{}", EPHEMERAL_PREFIX, pid)
}
