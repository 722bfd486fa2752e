//! Write command implementation

use anyhow::{Context, Result};
use logpro::{Json, WriteOptions};
use serde_json::Value;
use std::thread;
use std::time::Duration;

use crate::cli::WriteArgs;
use crate::output::print_result;

pub fn execute(args: WriteArgs) -> Result<()> {
    if super::warn_if_production() {
        return Ok(());
    }

    // Migrates this run's ephemeral logs when the command returns
    let _guard = logpro::install();

    let mut options = WriteOptions::new(args.file)
        .persistent(args.persistent)
        .show_timestamp(args.timestamp)
        .blank_lines(args.lines)
        .force_overwrite(!args.no_force);
    if let Some(folder) = args.folder {
        options = options.subfolder(folder);
    }

    let written = if args.parse_json {
        let value: Value =
            serde_json::from_str(&args.content).context("content is not valid JSON")?;
        logpro::log_pro(&Json(value), &options)?
    } else {
        logpro::log_pro(args.content.as_str(), &options)?
    };

    if let Some(path) = written {
        let message = format!("Wrote {}", path.display());
        print_result(&message, &serde_json::json!({ "path": path }));
    }

    if let Some(seconds) = args.hold {
        thread::sleep(Duration::from_secs(seconds));
    }
    Ok(())
}
