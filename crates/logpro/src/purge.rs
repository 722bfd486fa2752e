//! Bulk purge of the log root

use crate::layout::LogLayout;
use crate::migrate::remove_entry;
use logpro_core::{is_ephemeral_name, is_persistent_name};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use tracing::{info, warn};

/// Outcome of a purge
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    pub removed: usize,
    pub failed: usize,
}

/// Wipe the log root.
///
/// Removes every direct child of the root except persistent entries
/// (unless `include_persistent`) and the ephemeral roots of other
/// processes. This process's own ephemeral root is removed; the next
/// write recreates it. Per-entry failures are logged and counted.
pub fn purge_all(layout: &LogLayout, include_persistent: bool) -> PurgeReport {
    let mut report = PurgeReport::default();
    let root = layout.root();

    match fs::read_dir(root) {
        Ok(entries) => {
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
                let path = entry.path();

                if is_ephemeral_name(&name) && path != layout.ephemeral() {
                    continue;
                }
                if is_persistent_name(&name) && !include_persistent {
                    continue;
                }

                match remove_entry(&path) {
                    Ok(()) => report.removed += 1,
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => {
                        warn!("Failed to delete {}: {}", path.display(), e);
                        report.failed += 1;
                    }
                }
            }
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            warn!("Failed to scan {}: {}", root.display(), e);
            report.failed += 1;
        }
    }

    if include_persistent {
        if let Err(e) = fs::create_dir_all(root) {
            warn!("Failed to recreate {}: {}", root.display(), e);
            report.failed += 1;
        }
    }

    info!(
        "Purged {} entries from {} (include_persistent={})",
        report.removed,
        root.display(),
        include_persistent
    );
    report
}
