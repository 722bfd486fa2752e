//! Directory layout for a process
//!
//! ```text
//! <base>/logProLog/                 persistent root
//! <base>/logProLog/temp_<pid>/      ephemeral root of process <pid>
//! ```

use logpro_core::constants::{ephemeral_dir_name, log_root};
use std::path::{Path, PathBuf};

/// Resolved roots for one process. Pure: no filesystem access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLayout {
    root: PathBuf,
    ephemeral: PathBuf,
    pid: u32,
}

impl LogLayout {
    pub fn resolve(base_dir: &Path, pid: u32) -> Self {
        let root = log_root(base_dir);
        let ephemeral = root.join(ephemeral_dir_name(pid));
        Self {
            root,
            ephemeral,
            pid,
        }
    }

    /// Layout for the running process
    pub fn current(base_dir: &Path) -> Self {
        Self::resolve(base_dir, std::process::id())
    }

    /// Persistent root, shared by every process using the same base directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ephemeral root owned by this process
    pub fn ephemeral(&self) -> &Path {
        &self.ephemeral
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Ephemeral root another process would use
    pub fn ephemeral_dir_for(&self, pid: u32) -> PathBuf {
        self.root.join(ephemeral_dir_name(pid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_paths() {
        let layout = LogLayout::resolve(Path::new("/project"), 4242);
        assert_eq!(layout.root(), Path::new("/project/logProLog"));
        assert_eq!(layout.ephemeral(), Path::new("/project/logProLog/temp_4242"));
        assert_eq!(layout.pid(), 4242);
    }

    #[test]
    fn test_resolve_is_stable() {
        let base = Path::new("/project");
        assert_eq!(LogLayout::current(base), LogLayout::current(base));
        assert_eq!(LogLayout::current(base).pid(), std::process::id());
    }

    #[test]
    fn test_distinct_pids_get_distinct_roots() {
        let base = Path::new("/project");
        let a = LogLayout::resolve(base, 100);
        let b = LogLayout::resolve(base, 101);
        assert_eq!(a.root(), b.root());
        assert_ne!(a.ephemeral(), b.ephemeral());
        assert_eq!(a.ephemeral_dir_for(101), b.ephemeral());
    }
}
