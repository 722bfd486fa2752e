//! Process lifecycle hooks
//!
//! [`install`] arranges for the global facility's shutdown migration to run
//! when the process ends, either normally (the returned guard is dropped at
//! the end of `main` or while unwinding) or on SIGINT, SIGTERM or SIGQUIT.
//! After a signal the process still exits, with status `128 + signo`.
//!
//! `std::process::exit` called elsewhere skips destructors, so logs of such
//! a run stay in the ephemeral root until the next run reclaims them.
//!
//! The signal thread's shutdown can land while another thread is mid-write.
//! Shutdown is final for the facility, so writes that lose that race are
//! dropped instead of recreating the ephemeral root right before exit.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use tracing::{info, warn};

static SIGNALS_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Runs the global shutdown migration when dropped
#[must_use = "dropping the guard runs the shutdown migration immediately"]
#[derive(Debug)]
pub struct ShutdownGuard {
    armed: bool,
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        if self.armed {
            crate::global().shutdown();
        }
    }
}

/// Initialize the global facility and register the exit hooks.
///
/// Signal handlers are registered once per process; in production mode
/// nothing is registered and the guard is inert.
///
/// ```no_run
/// fn main() {
///     let _logs = logpro::install();
///     logpro::log_pro("starting", &Default::default()).ok();
/// }
/// ```
pub fn install() -> ShutdownGuard {
    let facility = crate::global();
    if facility.is_production() {
        return ShutdownGuard { armed: false };
    }

    if let Err(e) = facility.initialize() {
        warn!("Failed to initialize log directories: {}", e);
    }

    if !SIGNALS_INSTALLED.swap(true, Ordering::SeqCst) {
        if let Err(e) = spawn_signal_listener() {
            warn!("Failed to register termination handlers: {}", e);
        }
    }

    ShutdownGuard { armed: true }
}

fn spawn_signal_listener() -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // Register before returning so no signal slips through
    let listener = {
        let _enter = runtime.enter();
        TerminationListener::register()?
    };

    thread::Builder::new()
        .name("logpro-signals".to_string())
        .spawn(move || {
            let termination = runtime.block_on(listener.recv());
            info!("Received {}, migrating logs before exit", termination.name);
            crate::global().shutdown();
            std::process::exit(termination.exit_code());
        })?;
    Ok(())
}

/// A received termination signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Termination {
    name: &'static str,
    signo: i32,
}

impl Termination {
    fn exit_code(self) -> i32 {
        128 + self.signo
    }
}

#[cfg(unix)]
struct TerminationListener {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
    quit: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl TerminationListener {
    fn register() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
            quit: signal(SignalKind::quit())?,
        })
    }

    async fn recv(mut self) -> Termination {
        use nix::sys::signal::Signal;

        let signal = tokio::select! {
            _ = self.interrupt.recv() => Signal::SIGINT,
            _ = self.terminate.recv() => Signal::SIGTERM,
            _ = self.quit.recv() => Signal::SIGQUIT,
        };
        Termination {
            name: signal.as_str(),
            signo: signal as i32,
        }
    }
}

#[cfg(not(unix))]
struct TerminationListener;

#[cfg(not(unix))]
impl TerminationListener {
    fn register() -> io::Result<Self> {
        Ok(Self)
    }

    async fn recv(self) -> Termination {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl-C handler failed: {}", e);
            std::future::pending::<()>().await;
        }
        Termination {
            name: "Ctrl-C",
            signo: 2,
        }
    }
}
