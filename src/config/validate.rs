// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile, parse_duration};
use crate::errors::{Result, SuiteRunError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SuiteRunError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.env, raw.suite))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_global_config(cfg)?;
    validate_suites(cfg)?;
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    parse_duration(&cfg.config.shutdown_grace).map_err(|e| {
        SuiteRunError::ConfigError(format!("[config].shutdown_grace is invalid: {e}"))
    })?;
    Ok(())
}

fn validate_suites(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();

    for (idx, suite) in cfg.suite.iter().enumerate() {
        if suite.id.trim().is_empty() {
            return Err(SuiteRunError::ConfigError(format!(
                "suite #{} has an empty `id`",
                idx + 1
            )));
        }
        if suite.id.chars().any(char::is_whitespace) {
            return Err(SuiteRunError::ConfigError(format!(
                "suite id '{}' must not contain whitespace",
                suite.id
            )));
        }
        if suite.entry.trim().is_empty() {
            return Err(SuiteRunError::ConfigError(format!(
                "suite '{}' has an empty `entry`",
                suite.id
            )));
        }
        if !seen.insert(suite.id.as_str()) {
            return Err(SuiteRunError::DuplicateSuite(suite.id.clone()));
        }
    }

    Ok(())
}
