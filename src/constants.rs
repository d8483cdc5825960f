//! Fixed values shared across the crate.
//!
//! Environment variable names, publication defaults and the artifact paths
//! the sidecar links to all live here so the CLI, config layer and builder
//! agree on them.

/// Default repository owner used when `GH_OWNER` is not set.
pub const DEFAULT_OWNER: &str = "Bryan701701";

/// Default repository name used when `GH_REPO` is not set.
pub const DEFAULT_REPO: &str = "spoton-synoptic";

/// Default sidecar location, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "synoptic/atlantic_focus.png.json";

/// Host serving raw file contents at a specific revision.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// Rendered chart image.
pub const PNG_PATH: &str = "synoptic/atlantic_focus.png";

/// Area polygons drawn on the chart.
pub const AREAS_PATH: &str = "synoptic/atlantic_focus_areas.json";

/// Latest shipping forecast text.
pub const SHIPPING_FORECAST_PATH: &str = "synoptic/shipping_forecast_latest.json";

// Environment variables read at the process boundary.
pub const ENV_COMMIT: &str = "COMMIT_SHA";
pub const ENV_PRODUCT_TIME: &str = "PRODUCT_TIME";
pub const ENV_GENERATED_UTC: &str = "GENERATED_UTC";
pub const ENV_OWNER: &str = "GH_OWNER";
pub const ENV_REPO: &str = "GH_REPO";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";
