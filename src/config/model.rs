// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::errors::Result;
use crate::suite::{Invocation, SuiteDescriptor, SuiteList};

/// Raw configuration as read from a TOML file:
///
/// ```toml
/// [config]
/// interpreter = "node"
/// shutdown_grace = "5s"
///
/// [env]
/// FORCE_COLOR = "1"
///
/// [[suite]]
/// id = "login"
/// entry = "tests/login.test.mjs"
///
/// [[suite]]
/// id = "checkout"
/// entry = "tests/checkout.test.mjs"
/// args = ["--headed"]
/// ```
///
/// `[[suite]]` tables are kept in file order; that order is the run order.
/// All sections are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Environment overrides applied to every suite.
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// All suites from `[[suite]]`, in order.
    #[serde(default)]
    pub suite: Vec<SuiteConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Default interpreter for suites that don't set one. `None` (or an
    /// empty string) means entries are executed directly.
    #[serde(default)]
    pub interpreter: Option<String>,

    /// How long a suite gets to exit after being forwarded SIGTERM before it
    /// is killed. Duration string, e.g. `"5s"` or `"500ms"`.
    #[serde(default = "default_shutdown_grace")]
    pub shutdown_grace: String,
}

fn default_shutdown_grace() -> String {
    "5s".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            interpreter: None,
            shutdown_grace: default_shutdown_grace(),
        }
    }
}

/// `[[suite]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Stable, unique id used in logs and reports.
    pub id: String,

    /// Entry point: a script for the interpreter, or an executable.
    pub entry: String,

    /// Extra arguments appended after the entry.
    #[serde(default)]
    pub args: Vec<String>,

    /// Per-suite interpreter. `Some("")` forces direct execution even when
    /// `[config].interpreter` is set.
    #[serde(default)]
    pub interpreter: Option<String>,

    /// Working directory, relative to the config file's directory.
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    /// Per-suite environment overrides; these win over `[env]`.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Validated configuration. Only constructed via `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub env: BTreeMap<String, String>,
    pub suite: Vec<SuiteConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        env: BTreeMap<String, String>,
        suite: Vec<SuiteConfig>,
    ) -> Self {
        Self { config, env, suite }
    }

    /// Grace period between SIGTERM and a hard kill.
    pub fn shutdown_grace(&self) -> Result<Duration> {
        parse_duration(&self.config.shutdown_grace).map_err(crate::errors::SuiteRunError::ConfigError)
    }

    /// Build the run list. Relative `cwd` values are resolved against
    /// `base_dir` (normally the directory holding the config file).
    pub fn suite_list(&self, base_dir: &Path) -> Result<SuiteList> {
        let suites = self
            .suite
            .iter()
            .map(|s| SuiteDescriptor::new(s.id.clone(), self.invocation_for(s, base_dir)))
            .collect();
        SuiteList::new(suites)
    }

    fn invocation_for(&self, suite: &SuiteConfig, base_dir: &Path) -> Invocation {
        let interpreter = suite
            .interpreter
            .as_deref()
            .or(self.config.interpreter.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut inv = match interpreter {
            Some(interp) => Invocation::interpreted(interp, suite.entry.clone()),
            None => Invocation::direct(suite.entry.clone()),
        }
        .with_args(suite.args.iter().cloned());

        for (k, v) in self.env.iter().chain(suite.env.iter()) {
            inv = inv.with_env(k.clone(), v.clone());
        }

        if let Some(cwd) = &suite.cwd {
            inv = inv.with_cwd(base_dir.join(cwd));
        }

        inv
    }
}

/// Parse a duration like `"500ms"`, `"5s"`, `"2m"` or `"1h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;

    let secs_per_unit = match unit_part.trim().to_lowercase().as_str() {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        unit => {
            return Err(format!(
                "unsupported duration unit '{}'; expected ms, s, m, or h",
                unit
            ));
        }
    };

    value
        .checked_mul(secs_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration too large: '{}'", s))
}
