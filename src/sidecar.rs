//! Sidecar document model and builder.
//!
//! A sidecar is the small JSON file published next to the rendered chart
//! image. It records when the data and the render were produced and, when
//! the publishing revision is known, raw-content links to the image and its
//! two companion JSON files.
//!
//! [`build`] is a pure function of [`SidecarInputs`] and a [`Clock`]; the
//! clock is only consulted when no generation timestamp was supplied.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, format_utc_seconds};
use crate::constants;

/// Values a sidecar is built from.
///
/// Empty strings in the optional fields are treated the same as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidecarInputs {
    pub commit: Option<String>,
    pub product_time: Option<String>,
    pub generated_utc: Option<String>,
    pub owner: String,
    pub repo: String,
}

impl Default for SidecarInputs {
    fn default() -> Self {
        Self {
            commit: None,
            product_time: None,
            generated_utc: None,
            owner: constants::DEFAULT_OWNER.to_string(),
            repo: constants::DEFAULT_REPO.to_string(),
        }
    }
}

impl SidecarInputs {
    /// Revision identifier with surrounding whitespace removed, if any is left.
    #[must_use]
    pub fn commit(&self) -> Option<&str> {
        self.commit
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    #[must_use]
    pub fn product_time(&self) -> Option<&str> {
        non_empty(self.product_time.as_deref())
    }

    #[must_use]
    pub fn generated_utc(&self) -> Option<&str> {
        non_empty(self.generated_utc.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Outcome marker carried in every sidecar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
}

/// The published sidecar.
///
/// Field order is the serialized key order. Absent values serialize as
/// `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarDocument {
    pub status: Status,
    pub product_time: Option<String>,
    pub generated_utc: String,
    pub commit: Option<String>,
    pub png_url: Option<String>,
    pub areas_url: Option<String>,
    pub sf_url: Option<String>,
}

impl SidecarDocument {
    /// True when all three artifact links are populated.
    #[must_use]
    pub fn has_urls(&self) -> bool {
        self.png_url.is_some() && self.areas_url.is_some() && self.sf_url.is_some()
    }

    /// Serialize with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, which does not happen for
    /// string-only documents.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Raw-content URL for `path` at `commit`.
///
/// Components are inserted verbatim; nothing is percent-encoded.
#[must_use]
pub fn raw_content_url(owner: &str, repo: &str, commit: &str, path: &str) -> String {
    format!(
        "{}/{owner}/{repo}/{commit}/{path}",
        constants::RAW_CONTENT_BASE
    )
}

/// Assemble a sidecar from `inputs`.
///
/// A missing generation timestamp is filled from `clock`, truncated to whole
/// seconds. Links are only produced when a commit is present.
pub fn build(inputs: &SidecarInputs, clock: &impl Clock) -> SidecarDocument {
    let generated_utc = match inputs.generated_utc() {
        Some(given) => given.to_string(),
        None => format_utc_seconds(clock.now()),
    };

    let commit = inputs.commit();
    let url = |path: &str| commit.map(|c| raw_content_url(&inputs.owner, &inputs.repo, c, path));

    SidecarDocument {
        status: Status::Ok,
        product_time: inputs.product_time().map(str::to_string),
        generated_utc,
        commit: commit.map(str::to_string),
        png_url: url(constants::PNG_PATH),
        areas_url: url(constants::AREAS_PATH),
        sf_url: url(constants::SHIPPING_FORECAST_PATH),
    }
}
