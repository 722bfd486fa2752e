//! Clear command implementation - purges the log directory

use anyhow::{bail, Result};

use crate::output::print_result;

pub fn execute(all: bool) -> Result<()> {
    if super::warn_if_production() {
        return Ok(());
    }

    let report = logpro::clear_logs(all);
    let scope = if all { "all logs" } else { "non-persistent logs" };
    print_result(
        &format!("Cleared {} ({} entries removed)", scope, report.removed),
        &report,
    );

    if report.failed > 0 {
        bail!("{} entries could not be removed", report.failed)
    }
    Ok(())
}
