//! logpro - development-time file logging
//!
//! Entries are written under `<cwd>/logProLog`:
//! - persistent entries (`persistent_<name>`) accumulate across runs
//! - ephemeral entries go to `temp_<pid>/`, owned by the writing process,
//!   and are moved into the root when that process exits cleanly
//!
//! Directories orphaned by crashed runs are reclaimed at startup. With
//! `LOGPRO_PRODUCTION` set, everything is a no-op.

mod facility;
pub mod hooks;
pub mod layout;
pub mod migrate;
#[cfg(test)]
pub(crate) mod mock;
pub mod probe;
pub mod purge;
pub mod reclaim;
pub mod render;
pub mod router;
pub mod tracker;

pub use facility::LogPro;
pub use hooks::{install, ShutdownGuard};
pub use layout::LogLayout;
pub use logpro_core::{Config, Error, Result, WriteMode, WriteOptions};
pub use migrate::MigrationReport;
pub use probe::{is_process_alive, ProcessProbe, SystemProbe};
pub use purge::PurgeReport;
pub use reclaim::ReclaimReport;
pub use render::{Json, Render};

use once_cell::sync::Lazy;
use std::path::PathBuf;

static GLOBAL: Lazy<LogPro> = Lazy::new(|| LogPro::new(Config::from_env()));

/// The process-wide facility, configured from the environment on first use
pub fn global() -> &'static LogPro {
    &GLOBAL
}

/// Write an entry through the global facility
pub fn log_pro<C: Render + ?Sized>(
    content: &C,
    options: &WriteOptions,
) -> Result<Option<PathBuf>> {
    global().write(content, options)
}

/// Delete logs, keeping persistent entries unless `include_persistent`
pub fn clear_logs(include_persistent: bool) -> PurgeReport {
    global().purge_all(include_persistent)
}

pub fn initialize_log_dirs() -> Result<()> {
    global().initialize()
}

pub fn shutdown() -> MigrationReport {
    global().shutdown()
}
