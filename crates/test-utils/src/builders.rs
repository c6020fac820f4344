#![allow(dead_code)]

use suiterun::config::{ConfigFile, ConfigSection, RawConfigFile, SuiteConfig};
use suiterun::suite::{Invocation, SuiteDescriptor, SuiteList};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn interpreter(mut self, interp: &str) -> Self {
        self.config.config.interpreter = Some(interp.to_string());
        self
    }

    pub fn shutdown_grace(mut self, grace: &str) -> Self {
        self.config.config.shutdown_grace = grace.to_string();
        self
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.config.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suite(mut self, suite: SuiteConfig) -> Self {
        self.config.suite.push(suite);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `SuiteConfig`.
pub struct SuiteConfigBuilder {
    suite: SuiteConfig,
}

impl SuiteConfigBuilder {
    pub fn new(id: &str, entry: &str) -> Self {
        Self {
            suite: SuiteConfig {
                id: id.to_string(),
                entry: entry.to_string(),
                args: vec![],
                interpreter: None,
                cwd: None,
                env: Default::default(),
            },
        }
    }

    pub fn arg(mut self, arg: &str) -> Self {
        self.suite.args.push(arg.to_string());
        self
    }

    pub fn interpreter(mut self, interp: &str) -> Self {
        self.suite.interpreter = Some(interp.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.suite.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn cwd(mut self, cwd: &str) -> Self {
        self.suite.cwd = Some(cwd.into());
        self
    }

    pub fn build(self) -> SuiteConfig {
        self.suite
    }
}

/// Quick `SuiteList` of ids only; the invocation is never run by fakes.
pub fn suite_list(ids: &[&str]) -> SuiteList {
    SuiteList::new(
        ids.iter()
            .map(|id| SuiteDescriptor::new(*id, Invocation::interpreted("node", format!("{id}.mjs"))))
            .collect(),
    )
    .expect("duplicate ids in test suite list")
}

/// Suite that runs `script` through `sh -c`.
pub fn shell_suite(id: &str, script: &str) -> SuiteDescriptor {
    SuiteDescriptor::new(id, Invocation::interpreted("sh", "-c").with_args([script]))
}
