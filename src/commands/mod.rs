//! CLI command implementations.
//!
//! - [`generate`] - Build the sidecar and write it to disk
//! - [`show`] - Build the sidecar and print it without writing

pub mod generate;
pub mod show;

use anyhow::Result;
use std::path::Path;
use tracing::warn;

use synoptic_sidecar::config::{Overrides, Settings};

/// Resolve settings from all layers and validate them.
///
/// Validation warnings are logged and do not stop the command.
pub fn load_settings(config_path: Option<&Path>, overrides: &Overrides) -> Result<Settings> {
    let settings = Settings::from_process(config_path, overrides)?;
    let validation = settings.validate()?;

    for warning in &validation.warnings {
        warn!("{warning}");
    }

    Ok(settings)
}
