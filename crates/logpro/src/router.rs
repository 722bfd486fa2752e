//! Entry routing: from a logical write request to a file path

use crate::layout::LogLayout;
use logpro_core::{persistent_name, with_default_extension, Error, Result, DEFAULT_FILENAME};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Compute the target path without touching the filesystem.
///
/// Persistent entries land flat in the root as `persistent_<name>` and
/// ignore `subfolder`. Ephemeral entries land in the ephemeral root,
/// optionally under a (possibly multi-segment) subfolder. Only plain
/// subfolder segments are kept, so the result never leaves the ephemeral root.
pub fn resolve_target(
    layout: &LogLayout,
    filename: &str,
    persistent: bool,
    subfolder: Option<&str>,
) -> PathBuf {
    let filename = if filename.is_empty() {
        DEFAULT_FILENAME
    } else {
        filename
    };
    let filename = with_default_extension(filename);

    if persistent {
        return layout.root().join(persistent_name(&filename));
    }

    let mut dir = layout.ephemeral().to_path_buf();
    if let Some(folder) = subfolder
        .map(relative_folder)
        .filter(|f| !f.as_os_str().is_empty())
    {
        dir.push(folder);
    }
    dir.join(filename)
}

/// Resolve the target path and create its directory
pub fn route(
    layout: &LogLayout,
    filename: &str,
    persistent: bool,
    subfolder: Option<&str>,
) -> Result<PathBuf> {
    let path = resolve_target(layout, filename, persistent, subfolder);
    if let Some(dir) = path.parent() {
        ensure_dir(dir)?;
    }
    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        fs::create_dir_all(dir).map_err(|e| Error::fs("create directory", dir, e))?;
    }
    Ok(())
}

// Drops root, drive prefix, `.` and `..` components
fn relative_folder(folder: &str) -> PathBuf {
    Path::new(folder.trim_start_matches(['/', '\\']))
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(segment),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout() -> LogLayout {
        LogLayout::resolve(Path::new("/project"), 77)
    }

    #[test]
    fn test_ephemeral_default_extension() {
        let path = resolve_target(&layout(), "a", false, None);
        assert_eq!(path, PathBuf::from("/project/logProLog/temp_77/a.txt"));
    }

    #[test]
    fn test_empty_filename_uses_default() {
        let path = resolve_target(&layout(), "", false, None);
        assert_eq!(path, PathBuf::from("/project/logProLog/temp_77/default.txt"));
    }

    #[test]
    fn test_ephemeral_nested_subfolder() {
        let path = resolve_target(&layout(), "trace.log", false, Some("a/b"));
        assert_eq!(path, PathBuf::from("/project/logProLog/temp_77/a/b/trace.log"));
    }

    #[test]
    fn test_absolute_subfolder_stays_inside_root() {
        let path = resolve_target(&layout(), "x.txt", false, Some("/debug"));
        assert_eq!(path, PathBuf::from("/project/logProLog/temp_77/debug/x.txt"));
    }

    #[test]
    fn test_parent_segments_stay_inside_root() {
        let path = resolve_target(&layout(), "esc.txt", false, Some("../../../outside"));
        assert_eq!(path, PathBuf::from("/project/logProLog/temp_77/outside/esc.txt"));

        let path = resolve_target(&layout(), "esc.txt", false, Some("a/../.."));
        assert_eq!(path, PathBuf::from("/project/logProLog/temp_77/a/esc.txt"));

        let path = resolve_target(&layout(), "esc.txt", false, Some(".."));
        assert_eq!(path, PathBuf::from("/project/logProLog/temp_77/esc.txt"));
    }

    #[test]
    fn test_persistent_ignores_subfolder() {
        let path = resolve_target(&layout(), "b.json", true, Some("debug"));
        assert_eq!(path, PathBuf::from("/project/logProLog/persistent_b.json"));
    }

    #[test]
    fn test_persistent_prefix_applied_once() {
        let path = resolve_target(&layout(), "persistent_b.json", true, None);
        assert_eq!(path, PathBuf::from("/project/logProLog/persistent_b.json"));
    }

    #[test]
    fn test_route_creates_directories() {
        let dir = TempDir::new().unwrap();
        let layout = LogLayout::resolve(dir.path(), 5);

        let path = route(&layout, "c", false, Some("x/y")).unwrap();

        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());
        assert!(path.ends_with("temp_5/x/y/c.txt"));
    }

    #[test]
    fn test_route_propagates_create_failure() {
        let dir = TempDir::new().unwrap();
        let layout = LogLayout::resolve(dir.path(), 5);
        // A plain file where the root directory should be
        fs::write(dir.path().join("logProLog"), "not a directory").unwrap();

        let err = route(&layout, "c", false, None).unwrap_err();
        assert!(matches!(err, Error::Filesystem { .. }));
    }
}
