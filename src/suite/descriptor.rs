// src/suite/descriptor.rs

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use super::SuiteId;

/// How to launch a suite: program, arguments, environment overrides and an
/// optional working directory.
///
/// When an interpreter is configured, `program` is the interpreter and the
/// entry path is the first argument. Otherwise `program` is the entry itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    /// Run `entry` through `interpreter`, e.g. `node tests/login.mjs`.
    pub fn interpreted(interpreter: impl Into<String>, entry: impl Into<String>) -> Self {
        Self {
            program: interpreter.into(),
            args: vec![entry.into()],
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    /// Execute `entry` directly.
    pub fn direct(entry: impl Into<String>) -> Self {
        Self {
            program: entry.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// One test suite. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteDescriptor {
    id: SuiteId,
    invocation: Invocation,
}

impl SuiteDescriptor {
    pub fn new(id: impl Into<SuiteId>, invocation: Invocation) -> Self {
        Self {
            id: id.into(),
            invocation,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }
}
