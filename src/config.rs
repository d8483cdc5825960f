//! Settings resolution for sidecar generation.
//!
//! Inputs come from up to four layers, lowest precedence first:
//!
//! 1. Built-in defaults ([`constants`])
//! 2. An optional TOML file ([`ConfigFile`])
//! 3. Environment variables (`COMMIT_SHA`, `PRODUCT_TIME`, `GENERATED_UTC`,
//!    `GH_OWNER`, `GH_REPO`)
//! 4. Command-line flags ([`Overrides`])
//!
//! For owner and repo the first layer that is set wins, even when its value
//! is empty; the value is substituted into URLs verbatim. For the per-run
//! values (commit, timestamps) and the output path an empty string counts as
//! unset and falls through to the layer below.
//!
//! The environment is read once through a lookup function so resolution can
//! be tested without touching process state.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::env::VarError;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::output::WriteMode;
use crate::sidecar::SidecarInputs;

/// Result of settings validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Non-fatal warnings that should be logged but don't prevent generation.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Optional TOML configuration file.
///
/// ```toml
/// [publish]
/// owner = "Acme"
/// repo = "charts"
///
/// [output]
/// path = "synoptic/atlantic_focus.png.json"
/// atomic = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub publish: PublishSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// Where the referenced artifacts are published.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublishSection {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub atomic: Option<bool>,
}

impl ConfigFile {
    /// Load configuration from the specified path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (IO error)
    /// - The file contains invalid TOML syntax
    /// - The file contains unknown sections or keys
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub commit: Option<String>,
    pub product_time: Option<String>,
    pub generated_utc: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub output: Option<PathBuf>,
    pub atomic: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub inputs: SidecarInputs,
    pub output: PathBuf,
    pub write_mode: WriteMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            inputs: SidecarInputs::default(),
            output: PathBuf::from(constants::DEFAULT_OUTPUT_PATH),
            write_mode: WriteMode::default(),
        }
    }
}

/// First candidate that is present and non-empty.
fn first_set<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

/// First candidate that is present, empty or not.
fn first_present<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates.into_iter().flatten().next()
}

/// Interpret one environment lookup.
///
/// Unset is `None`. A value that is not valid UTF-8 is an error rather than
/// being mistaken for unset.
fn env_value(name: &str, value: std::result::Result<String, VarError>) -> Result<Option<String>> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => {
            anyhow::bail!("{name} is not valid UTF-8: {}", raw.to_string_lossy())
        },
    }
}

/// Read every variable the sidecar uses from the process environment.
fn read_process_env() -> Result<HashMap<&'static str, String>> {
    let names = [
        constants::ENV_COMMIT,
        constants::ENV_PRODUCT_TIME,
        constants::ENV_GENERATED_UTC,
        constants::ENV_OWNER,
        constants::ENV_REPO,
    ];

    let mut vars = HashMap::new();
    for name in names {
        if let Some(value) = env_value(name, std::env::var(name))? {
            vars.insert(name, value);
        }
    }
    Ok(vars)
}

impl Settings {
    /// Resolve settings from a config file, an environment lookup and CLI
    /// overrides.
    pub fn resolve<F>(file: Option<&ConfigFile>, env: F, overrides: &Overrides) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let empty = ConfigFile::default();
        let file = file.unwrap_or(&empty);
        let (publish, output) = (&file.publish, &file.output);

        let owner = first_present([
            overrides.owner.clone(),
            env(constants::ENV_OWNER),
            publish.owner.clone(),
        ])
        .unwrap_or_else(|| constants::DEFAULT_OWNER.to_string());

        let repo = first_present([
            overrides.repo.clone(),
            env(constants::ENV_REPO),
            publish.repo.clone(),
        ])
        .unwrap_or_else(|| constants::DEFAULT_REPO.to_string());

        let inputs = SidecarInputs {
            commit: first_set([overrides.commit.clone(), env(constants::ENV_COMMIT)]),
            product_time: first_set([
                overrides.product_time.clone(),
                env(constants::ENV_PRODUCT_TIME),
            ]),
            generated_utc: first_set([
                overrides.generated_utc.clone(),
                env(constants::ENV_GENERATED_UTC),
            ]),
            owner,
            repo,
        };

        let output_path = overrides
            .output
            .clone()
            .or_else(|| output.path.clone())
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OUTPUT_PATH));

        let write_mode = if overrides.atomic || output.atomic.unwrap_or(false) {
            WriteMode::Atomic
        } else {
            WriteMode::Overwrite
        };

        Self {
            inputs,
            output: output_path,
            write_mode,
        }
    }

    /// Resolve settings against the real process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `config_path` is given and cannot be loaded, or
    /// if a sidecar environment variable is not valid UTF-8.
    pub fn from_process(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = config_path.map(ConfigFile::load_from).transpose()?;
        let vars = read_process_env()?;
        Ok(Self::resolve(
            file.as_ref(),
            |name| vars.get(name).cloned(),
            overrides,
        ))
    }

    /// Validate resolved settings.
    ///
    /// Timestamps are never rejected: a value that does not parse as
    /// RFC 3339 only produces a warning and is still written verbatim.
    ///
    /// # Errors
    ///
    /// Returns an error if the output path is empty.
    pub fn validate(&self) -> Result<ValidationResult> {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.inputs.owner.is_empty() {
            warnings.push("owner is empty; URLs will contain an empty owner segment".to_string());
        }
        if self.inputs.repo.is_empty() {
            warnings.push("repo is empty; URLs will contain an empty repo segment".to_string());
        }
        if self.output.as_os_str().is_empty() {
            errors.push("output path cannot be empty".to_string());
        }

        let timestamps = [
            (constants::ENV_PRODUCT_TIME, self.inputs.product_time()),
            (constants::ENV_GENERATED_UTC, self.inputs.generated_utc()),
        ];
        for (name, value) in timestamps {
            if let Some(value) = value
                && chrono::DateTime::parse_from_rfc3339(value).is_err()
            {
                warnings.push(format!(
                    "{name} is not an RFC 3339 timestamp: '{value}'\n  \
                     It will be written unchanged"
                ));
            }
        }

        if self.inputs.commit().is_none() {
            warnings.push(format!(
                "{} is not set; artifact URLs will be null",
                constants::ENV_COMMIT
            ));
        }

        if !errors.is_empty() {
            anyhow::bail!(
                "Settings validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }

        Ok(ValidationResult { warnings })
    }
}
