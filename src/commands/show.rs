//! Print the sidecar to stdout without touching the filesystem.

use anyhow::Result;

use synoptic_sidecar::clock::Clock;
use synoptic_sidecar::config::Settings;
use synoptic_sidecar::sidecar;

/// Build the sidecar and print it in the same format `generate` writes.
pub fn execute(settings: &Settings, clock: &impl Clock) -> Result<()> {
    let document = sidecar::build(&settings.inputs, clock);
    println!("{}", document.to_json_pretty()?);
    Ok(())
}
