//! The logging facility: one instance owns all per-process state

use crate::layout::LogLayout;
use crate::migrate::{migrate, MigrationReport};
use crate::probe::{ProcessProbe, SystemProbe};
use crate::purge::{purge_all, PurgeReport};
use crate::reclaim::{reclaim_orphans, ReclaimReport};
use crate::render::{format_entry, Render};
use crate::router::route;
use crate::tracker::WriteTracker;
use logpro_core::{is_reserved_name, Config, Error, Result, WriteMode, WriteOptions};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Active,
    ShutDown,
}

struct State {
    phase: Phase,
    tracker: WriteTracker,
}

/// Development log facility.
///
/// Lifecycle: `initialize` (explicit or on first write) creates the roots
/// and reclaims orphans; `shutdown` migrates the ephemeral root into the
/// persistent root. Shutdown is final: later writes are dropped and the
/// ephemeral root is never recreated. In production mode every operation
/// is a no-op.
pub struct LogPro {
    config: Config,
    layout: LogLayout,
    probe: Box<dyn ProcessProbe>,
    state: Mutex<State>,
}

impl std::fmt::Debug for LogPro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogPro")
            .field("config", &self.config)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl LogPro {
    /// Facility for the running process
    pub fn new(config: Config) -> Self {
        Self::with_probe(config, std::process::id(), Box::new(SystemProbe))
    }

    /// Facility acting as process `pid`, with a custom liveness probe
    pub fn with_probe(config: Config, pid: u32, probe: Box<dyn ProcessProbe>) -> Self {
        let layout = LogLayout::resolve(config.base_dir(), pid);
        Self {
            config,
            layout,
            probe,
            state: Mutex::new(State {
                phase: Phase::Uninitialized,
                tracker: WriteTracker::new(),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> &LogLayout {
        &self.layout
    }

    pub fn is_production(&self) -> bool {
        self.config.production
    }

    /// Whether the directories are set up and not yet migrated
    pub fn is_active(&self) -> bool {
        self.state.lock().phase == Phase::Active
    }

    /// Create the roots and reclaim orphans. Idempotent, and a no-op after shutdown.
    pub fn initialize(&self) -> Result<()> {
        if self.is_production() {
            return Ok(());
        }
        let mut state = self.state.lock();
        self.initialize_locked(&mut state)
    }

    fn initialize_locked(&self, state: &mut State) -> Result<()> {
        if state.phase != Phase::Uninitialized {
            return Ok(());
        }

        let root = self.layout.root();
        fs::create_dir_all(root).map_err(|e| Error::fs("create directory", root, e))?;

        let report = reclaim_orphans(root, self.probe.as_ref());
        if report.removed > 0 {
            info!("Reclaimed {} orphaned log directories", report.removed);
        }

        let ephemeral = self.layout.ephemeral();
        fs::create_dir_all(ephemeral).map_err(|e| Error::fs("create directory", ephemeral, e))?;

        state.phase = Phase::Active;
        debug!("Log directories ready under {}", root.display());
        Ok(())
    }

    /// Write one entry. Returns the file written, or `None` in production
    /// and after shutdown.
    ///
    /// Filesystem failures are returned to the caller.
    pub fn write<C: Render + ?Sized>(
        &self,
        content: &C,
        options: &WriteOptions,
    ) -> Result<Option<PathBuf>> {
        if self.is_production() {
            return Ok(None);
        }
        if !options.persistent {
            check_ephemeral_names(options)?;
        }

        let entry = format_entry(content, options.show_timestamp, options.blank_lines);

        let mut state = self.state.lock();
        if state.phase == Phase::ShutDown {
            warn!("Dropping write to {} after shutdown", options.filename);
            return Ok(None);
        }
        self.initialize_locked(&mut state)?;

        let path = route(
            &self.layout,
            &options.filename,
            options.persistent,
            options.subfolder.as_deref(),
        )?;
        let mode = state
            .tracker
            .mode_for(&path, options.persistent, options.force_overwrite);

        write_file(&path, mode, entry.as_bytes())?;
        if mode == WriteMode::Overwrite {
            state.tracker.mark_initialized(&path);
        }
        Ok(Some(path))
    }

    /// Run orphan reclamation outside of initialization
    pub fn reclaim_orphans(&self) -> ReclaimReport {
        if self.is_production() {
            return ReclaimReport::default();
        }
        let _state = self.state.lock();
        reclaim_orphans(self.layout.root(), self.probe.as_ref())
    }

    /// Delete logs under the root, see [`purge_all`]
    pub fn purge_all(&self, include_persistent: bool) -> PurgeReport {
        if self.is_production() {
            return PurgeReport::default();
        }
        let _state = self.state.lock();
        purge_all(&self.layout, include_persistent)
    }

    /// Migrate ephemeral logs into the root.
    ///
    /// Only acts once per initialization; calling it again, or before
    /// anything was initialized, does nothing.
    pub fn shutdown(&self) -> MigrationReport {
        if self.is_production() {
            return MigrationReport::default();
        }
        let mut state = self.state.lock();
        if state.phase != Phase::Active {
            return MigrationReport::default();
        }

        let report = migrate(&self.layout);
        state.phase = Phase::ShutDown;
        info!(
            "Migrated {} log files into {} ({} failures)",
            report.moved,
            self.layout.root().display(),
            report.failed
        );
        report
    }
}

fn check_ephemeral_names(options: &WriteOptions) -> Result<()> {
    if is_reserved_name(&options.filename) {
        return Err(Error::ReservedName(options.filename.clone()));
    }
    if let Some(folder) = &options.subfolder {
        if Path::new(folder)
            .components()
            .any(|c| c == Component::ParentDir)
        {
            return Err(Error::InvalidSubfolder(folder.clone()));
        }
        if let Some(segment) = Path::new(folder)
            .iter()
            .map(|s| s.to_string_lossy())
            .find(|s| is_reserved_name(s))
        {
            return Err(Error::ReservedName(segment.into_owned()));
        }
    }
    Ok(())
}

fn write_file(path: &Path, mode: WriteMode, bytes: &[u8]) -> Result<()> {
    let mut open = OpenOptions::new();
    match mode {
        WriteMode::Overwrite => open.write(true).create(true).truncate(true),
        WriteMode::Append => open.append(true).create(true),
    };
    let mut file = open.open(path).map_err(|e| Error::fs("open", path, e))?;
    file.write_all(bytes).map_err(|e| Error::fs("write", path, e))
}
