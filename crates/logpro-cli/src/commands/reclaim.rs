//! Reclaim command implementation

use anyhow::Result;

use crate::output::print_result;

pub fn execute() -> Result<()> {
    if super::warn_if_production() {
        return Ok(());
    }

    let report = logpro::global().reclaim_orphans();
    print_result(
        &format!(
            "Reclaimed {} orphaned directories ({} live, {} invalid, {} failed)",
            report.removed, report.skipped_live, report.skipped_invalid, report.failed
        ),
        &report,
    );
    Ok(())
}
