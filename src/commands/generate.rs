//! Write the sidecar file.

use anyhow::Result;
use tracing::info;

use synoptic_sidecar::clock::Clock;
use synoptic_sidecar::config::Settings;
use synoptic_sidecar::{output, sidecar};

/// Build the sidecar and write it to the configured output path.
///
/// Prints `Wrote <path>` to stdout on success. A missing or unwritable
/// parent directory is reported as-is; nothing is retried or created.
pub fn execute(settings: &Settings, clock: &impl Clock) -> Result<()> {
    let document = sidecar::build(&settings.inputs, clock);

    info!(
        commit = document.commit.as_deref().unwrap_or("-"),
        generated_utc = %document.generated_utc,
        "Built sidecar"
    );

    output::write(&document, &settings.output, settings.write_mode)?;

    println!("Wrote {}", settings.output.display());
    Ok(())
}
