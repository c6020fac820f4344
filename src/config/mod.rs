// src/config/mod.rs

//! Configuration loading and validation for suiterun.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like unique suite ids (`validate.rs`).
//!
//! The orchestrator never reads configuration itself; the boundary layer in
//! `lib.rs` turns a [`ConfigFile`] into a [`crate::suite::SuiteList`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, ConfigSection, RawConfigFile, SuiteConfig, parse_duration};
