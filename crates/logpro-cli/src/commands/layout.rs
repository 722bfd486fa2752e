//! Layout command implementation

use anyhow::Result;
use serde_json::json;

use crate::output::{is_json_mode, print_info};

pub fn execute() -> Result<()> {
    let facility = logpro::global();
    let layout = facility.layout();

    if is_json_mode() {
        let value = json!({
            "root": layout.root(),
            "ephemeral": layout.ephemeral(),
            "pid": layout.pid(),
            "production": facility.is_production(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_info(&format!("root:      {}", layout.root().display()));
    print_info(&format!("ephemeral: {}", layout.ephemeral().display()));
    if facility.is_production() {
        print_info("production mode: logging disabled");
    }
    Ok(())
}
