//! Orphan reclamation
//!
//! Removes `temp_<pid>` directories left behind by processes that exited
//! without migrating their logs.

use crate::probe::ProcessProbe;
use logpro_core::{is_ephemeral_name, parse_ephemeral_pid};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of a reclaim pass
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ReclaimReport {
    /// Directories of dead processes that were deleted
    pub removed: usize,
    /// Directories owned by a live process
    pub skipped_live: usize,
    /// `temp_` directories whose name carries no valid pid
    pub skipped_invalid: usize,
    /// Entries that could not be inspected or deleted
    pub failed: usize,
}

/// Scan `root` and delete ephemeral directories of dead processes.
///
/// Never fails: every per-entry error is logged and counted.
pub fn reclaim_orphans(root: &Path, probe: &dyn ProcessProbe) -> ReclaimReport {
    let mut report = ReclaimReport::default();

    if let Err(e) = fs::create_dir_all(root) {
        warn!("Failed to create log root {}: {}", root.display(), e);
        report.failed += 1;
        return report;
    }

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to scan log root {}: {}", root.display(), e);
            report.failed += 1;
            return report;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry in {}: {}", root.display(), e);
                report.failed += 1;
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_ephemeral_name(&name) {
            continue;
        }

        let path = entry.path();
        match entry.file_type() {
            Ok(kind) if kind.is_dir() => {}
            Ok(_) => continue,
            Err(e) => {
                warn!("Failed to stat {}: {}", path.display(), e);
                report.failed += 1;
                continue;
            }
        }

        let pid = match parse_ephemeral_pid(&name) {
            Ok(pid) => pid,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                report.skipped_invalid += 1;
                continue;
            }
        };

        if probe.is_alive(pid) {
            debug!("Keeping {} (pid {} is alive)", path.display(), pid);
            report.skipped_live += 1;
            continue;
        }

        match fs::remove_dir_all(&path) {
            Ok(()) => {
                info!("Reclaimed orphaned log directory {}", path.display());
                report.removed += 1;
            }
            // Another process reclaimed it first
            Err(e) if e.kind() == ErrorKind::NotFound => report.removed += 1,
            Err(e) => {
                warn!("Failed to remove orphaned directory {}: {}", path.display(), e);
                report.failed += 1;
            }
        }
    }

    report
}
