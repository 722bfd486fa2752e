//! Mock implementations for testing

use crate::probe::ProcessProbe;
use logpro_core::{Error, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A scripted liveness probe that records how often it was queried
#[derive(Debug, Default)]
pub struct MockProbe {
    /// Pids reported alive
    alive: HashSet<u32>,
    /// Pids whose check fails
    failing: HashSet<u32>,
    /// Number of check calls
    call_count: AtomicUsize,
}

impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alive(mut self, pid: u32) -> Self {
        self.alive.insert(pid);
        self
    }

    pub fn with_failing(mut self, pid: u32) -> Self {
        self.failing.insert(pid);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl ProcessProbe for MockProbe {
    fn check(&self, pid: u32) -> Result<bool> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&pid) {
            return Err(Error::probe(pid, "simulated failure"));
        }
        Ok(self.alive.contains(&pid))
    }
}
