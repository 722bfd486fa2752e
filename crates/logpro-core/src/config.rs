//! Runtime configuration for logpro
//!
//! Configuration is read once, when the facility is built:
//! - the base directory (the process working directory)
//! - the production switch (`LOGPRO_PRODUCTION`, or `LOGPRO_ENV=production`)

use std::path::{Path, PathBuf};

use crate::constants::*;

/// Facility configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the log root is anchored in
    pub base_dir: PathBuf,
    /// When set, every operation is a no-op
    pub production: bool,
}

impl Config {
    /// Development config anchored at an explicit base directory
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            production: false,
        }
    }

    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Build the config from the working directory and environment
    pub fn from_env() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let production = production_from(
            std::env::var(PRODUCTION_ENV).ok().as_deref(),
            std::env::var(ENVIRONMENT_ENV).ok().as_deref(),
        );
        Self {
            base_dir,
            production,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

/// Decide production mode from the raw switch values
pub fn production_from(switch: Option<&str>, environment: Option<&str>) -> bool {
    if let Some(value) = switch {
        if is_truthy(value) {
            return true;
        }
    }
    matches!(environment, Some(env) if env.trim().eq_ignore_ascii_case("production"))
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    ["1", "true", "yes", "on"]
        .iter()
        .any(|t| value.eq_ignore_ascii_case(t))
}
