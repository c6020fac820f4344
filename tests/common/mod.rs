#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub use suiterun_test_utils::{init_tracing, with_timeout};

/// Write `contents` to a temporary `.toml` file that lives as long as the
/// returned handle.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    write!(file, "{contents}").expect("write temp config");
    file
}
