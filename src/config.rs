//! `tidy.toml` loading.
//!
//! The file is optional and lives at the project root. CLI flags take
//! precedence over anything it sets.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::TidyError;
use crate::steps::StepFlags;

pub const CONFIG_FILE_NAME: &str = "tidy.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TidyConfig {
    pub fmt: FmtSection,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FmtSection {
    /// Also enable `clippy::pedantic` during the lint step.
    pub pedantic: bool,
    /// Pass `--allow-no-vcs` to the fix steps.
    pub allow_no_vcs: bool,
}

pub fn parse_config(contents: &str) -> Result<TidyConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Load `tidy.toml` from `root`, or defaults when there is none.
pub fn load_or_default(root: &Path) -> Result<TidyConfig, TidyError> {
    let path = root.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        debug!("no config file at {}", path.display());
        return Ok(TidyConfig::default());
    }

    debug!("loading config from {}", path.display());
    let contents = fs::read_to_string(&path)
        .map_err(|e| TidyError::Config { path: path.clone(), message: e.to_string() })?;
    parse_config(&contents).map_err(|e| TidyError::Config { path, message: e.to_string() })
}

/// Overrides coming from the command line. `None` leaves the file's value alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub pedantic: Option<bool>,
    pub allow_no_vcs: Option<bool>,
    pub cargo: Option<String>,
    pub dry_run: bool,
    pub json: bool,
}

/// Effective settings for one run of the format task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FmtConfig {
    pub root: PathBuf,
    pub cargo: String,
    pub flags: StepFlags,
    pub dry_run: bool,
    pub json: bool,
}

impl FmtConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cargo: "cargo".to_string(),
            flags: StepFlags::default(),
            dry_run: false,
            json: false,
        }
    }

    pub fn merge(root: PathBuf, file: &TidyConfig, cli: CliOverrides) -> Self {
        Self {
            flags: StepFlags {
                pedantic: cli.pedantic.unwrap_or(file.fmt.pedantic),
                allow_no_vcs: cli.allow_no_vcs.unwrap_or(file.fmt.allow_no_vcs),
            },
            cargo: cli.cargo.unwrap_or_else(|| "cargo".to_string()),
            dry_run: cli.dry_run,
            json: cli.json,
            root,
        }
    }

    /// Read `tidy.toml` under `root` and apply the CLI overrides on top.
    pub fn resolve(root: PathBuf, cli: CliOverrides) -> Result<Self, TidyError> {
        let file = load_or_default(&root)?;
        Ok(Self::merge(root, &file, cli))
    }
}
