//! Process liveness checks
//!
//! Ephemeral directories are owned by the process whose id they carry. A
//! directory may only be reclaimed when that process is gone.
//!
//! Probe failures are reported as "not alive". A transient OS error (for
//! example `EPERM` for a process owned by another user) can therefore let a
//! directory of a still-running process be reclaimed. This is a known risk
//! and is kept so that crashed runs never leak directories.

use logpro_core::{Error, Result};
use tracing::warn;

/// Liveness check for an operating-system process id
pub trait ProcessProbe: Send + Sync {
    /// Query the OS. `Err` means the answer is unknown.
    fn check(&self, pid: u32) -> Result<bool>;

    /// Fail-closed liveness: an unknown answer counts as dead
    fn is_alive(&self, pid: u32) -> bool {
        match self.check(pid) {
            Ok(alive) => alive,
            Err(e) => {
                warn!("Treating pid {} as not alive: {}", pid, e);
                false
            }
        }
    }
}

/// Probe backed by the host OS
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl ProcessProbe for SystemProbe {
    #[cfg(unix)]
    fn check(&self, pid: u32) -> Result<bool> {
        use nix::errno::Errno;
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        if pid == 0 {
            return Ok(false);
        }
        // Values above i32::MAX would address process groups
        let raw = i32::try_from(pid).map_err(|_| Error::probe(pid, "pid out of range"))?;

        // Signal 0 performs the permission and existence checks only
        match kill(Pid::from_raw(raw), None) {
            Ok(()) => Ok(true),
            Err(Errno::ESRCH) => Ok(false),
            Err(errno) => Err(Error::probe(pid, errno.desc())),
        }
    }

    #[cfg(not(unix))]
    fn check(&self, pid: u32) -> Result<bool> {
        use sysinfo::{Pid, System};

        if pid == 0 {
            return Ok(false);
        }
        let mut system = System::new();
        Ok(system.refresh_process(Pid::from_u32(pid)))
    }
}

/// Check a pid with the host OS probe
pub fn is_process_alive(pid: u32) -> bool {
    SystemProbe.is_alive(pid)
}
