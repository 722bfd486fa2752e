//! Command implementations

pub mod clear;
pub mod layout;
pub mod reclaim;
pub mod write;

use crate::output::print_warning;

/// Warn when the facility is switched off
fn warn_if_production() -> bool {
    let production = logpro::global().is_production();
    if production {
        print_warning("Production mode is set, logpro is disabled");
    }
    production
}
