//! Shutdown migration
//!
//! On a clean exit the ephemeral root is merged into the persistent root,
//! replacing whatever the previous run left there, and then removed.

use crate::layout::LogLayout;
use logpro_core::is_reserved_name;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Outcome of a migration
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Leftover entries deleted from the destination
    pub stale_removed: usize,
    /// Files moved from the ephemeral root
    pub moved: usize,
    /// Entries that could not be removed or moved
    pub failed: usize,
}

/// Run the three migration steps for `layout`. Never fails.
pub fn migrate(layout: &LogLayout) -> MigrationReport {
    let mut report = MigrationReport::default();

    remove_stale_files(layout.root(), &mut report);
    merge_tree(layout.ephemeral(), layout.root(), &is_reserved_name, &mut report);

    match fs::remove_dir_all(layout.ephemeral()) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            warn!("Failed to remove {}: {}", layout.ephemeral().display(), e);
            report.failed += 1;
        }
    }

    report
}

/// Delete plain files in `root` that are not persistent entries
pub fn remove_stale_files(root: &Path, report: &mut MigrationReport) {
    let Some(entries) = read_dir_logged(root, report) else {
        return;
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_reserved_name(&name) {
            continue;
        }
        let path = entry.path();
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => report.stale_removed += 1,
            Err(e) => {
                warn!("Failed to delete {}: {}", path.display(), e);
                report.failed += 1;
            }
        }
    }
}

/// Recursively move `source` into `target`.
///
/// At every level the unprotected entries already in `target` are removed
/// first; files then replace same-named files and directories recurse.
/// Each entry is handled independently.
pub fn merge_tree(
    source: &Path,
    target: &Path,
    is_protected: &dyn Fn(&str) -> bool,
    report: &mut MigrationReport,
) {
    if !source.is_dir() {
        return;
    }

    if let Err(e) = fs::create_dir_all(target) {
        warn!("Failed to create {}: {}", target.display(), e);
        report.failed += 1;
        return;
    }

    clear_level(target, is_protected, report);

    let Some(entries) = read_dir_logged(source, report) else {
        return;
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry in {}: {}", source.display(), e);
                report.failed += 1;
                continue;
            }
        };
        let from = entry.path();
        let to = target.join(entry.file_name());

        match entry.file_type() {
            Ok(kind) if kind.is_dir() => merge_tree(&from, &to, is_protected, report),
            Ok(_) => match move_file(&from, &to) {
                Ok(()) => {
                    debug!("Moved {} -> {}", from.display(), to.display());
                    report.moved += 1;
                }
                Err(e) => {
                    warn!("Failed to move {} to {}: {}", from.display(), to.display(), e);
                    report.failed += 1;
                }
            },
            Err(e) => {
                warn!("Failed to stat {}: {}", from.display(), e);
                report.failed += 1;
            }
        }
    }
}

fn clear_level(dir: &Path, is_protected: &dyn Fn(&str) -> bool, report: &mut MigrationReport) {
    let Some(entries) = read_dir_logged(dir, report) else {
        return;
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_protected(&name) {
            continue;
        }
        let path = entry.path();
        match remove_entry(&path) {
            Ok(()) => report.stale_removed += 1,
            Err(e) => {
                warn!("Failed to delete {}: {}", path.display(), e);
                report.failed += 1;
            }
        }
    }
}

fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::remove_file(to) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::rename(from, to)
}

/// Remove a file or a whole directory tree
pub(crate) fn remove_entry(path: &Path) -> std::io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn read_dir_logged(dir: &Path, report: &mut MigrationReport) -> Option<fs::ReadDir> {
    match fs::read_dir(dir) {
        Ok(entries) => Some(entries),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Failed to scan {}: {}", dir.display(), e);
            report.failed += 1;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_migrate_moves_ephemeral_content() {
        let dir = TempDir::new().unwrap();
        let layout = LogLayout::resolve(dir.path(), 10);
        write(&layout.ephemeral().join("a.txt"), "new a");
        write(&layout.ephemeral().join("debug/deep/b.txt"), "new b");

        let report = migrate(&layout);

        assert_eq!(report.moved, 2);
        assert_eq!(report.failed, 0);
        assert_eq!(read(&layout.root().join("a.txt")), "new a");
        assert_eq!(read(&layout.root().join("debug/deep/b.txt")), "new b");
        assert!(!layout.ephemeral().exists());
    }

    #[test]
    fn test_migrate_replaces_previous_run() {
        let dir = TempDir::new().unwrap();
        let layout = LogLayout::resolve(dir.path(), 10);
        write(&layout.root().join("a.txt"), "old a");
        write(&layout.root().join("stale.txt"), "old stale");
        write(&layout.root().join("debug/old.txt"), "old nested");
        write(&layout.root().join("persistent_keep.txt"), "kept");
        write(&layout.ephemeral().join("a.txt"), "new a");
        write(&layout.ephemeral().join("debug/new.txt"), "new nested");

        migrate(&layout);

        assert_eq!(read(&layout.root().join("a.txt")), "new a");
        assert!(!layout.root().join("stale.txt").exists());
        assert!(!layout.root().join("debug/old.txt").exists());
        assert_eq!(read(&layout.root().join("debug/new.txt")), "new nested");
        assert_eq!(read(&layout.root().join("persistent_keep.txt")), "kept");
    }

    #[test]
    fn test_migrate_leaves_other_ephemeral_roots() {
        let dir = TempDir::new().unwrap();
        let layout = LogLayout::resolve(dir.path(), 10);
        let other = layout.ephemeral_dir_for(11);
        write(&other.join("x.txt"), "other process");
        write(&layout.ephemeral().join("a.txt"), "mine");

        migrate(&layout);

        assert_eq!(read(&other.join("x.txt")), "other process");
        assert!(layout.root().join("a.txt").exists());
    }

    #[test]
    fn test_repeated_migrate_clears_previous_output() {
        let dir = TempDir::new().unwrap();
        let layout = LogLayout::resolve(dir.path(), 10);
        write(&layout.ephemeral().join("a.txt"), "mine");

        migrate(&layout);
        let second = migrate(&layout);

        assert_eq!(second.moved, 0);
        assert!(!layout.ephemeral().exists());
        // Step 1 treats the first pass's output as leftovers
        assert!(!layout.root().join("a.txt").exists());
    }

    #[test]
    fn test_migrate_without_ephemeral_root() {
        let dir = TempDir::new().unwrap();
        let layout = LogLayout::resolve(dir.path(), 10);

        let report = migrate(&layout);

        assert_eq!(report, MigrationReport::default());
    }

    #[test]
    fn test_remove_stale_keeps_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(&root.join("stale.txt"), "x");
        write(&root.join("persistent_a.txt"), "x");
        write(&root.join("temp_5/a.txt"), "x");
        write(&root.join("debug/a.txt"), "x");

        let mut report = MigrationReport::default();
        remove_stale_files(root, &mut report);

        assert_eq!(report.stale_removed, 1);
        assert!(!root.join("stale.txt").exists());
        assert!(root.join("persistent_a.txt").exists());
        assert!(root.join("temp_5/a.txt").exists());
        assert!(root.join("debug/a.txt").exists());
    }

    #[test]
    fn test_merge_tree_respects_predicate() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src");
        let target = dir.path().join("dst");
        write(&source.join("a.txt"), "a");
        write(&target.join("keep.me"), "kept");
        write(&target.join("drop.me"), "dropped");

        let mut report = MigrationReport::default();
        merge_tree(&source, &target, &|name: &str| name.starts_with("keep"), &mut report);

        assert!(target.join("keep.me").exists());
        assert!(!target.join("drop.me").exists());
        assert_eq!(read(&target.join("a.txt")), "a");
        // merge_tree moves, it does not delete the source directory itself
        assert!(source.is_dir());
        assert!(!source.join("a.txt").exists());
    }
}
