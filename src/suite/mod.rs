// src/suite/mod.rs

//! Suite inventory types.
//!
//! - [`descriptor`] holds one suite's id and its invocation recipe.
//! - [`list`] holds the ordered, duplicate-free run list.

/// Canonical suite identifier used throughout the crate.
pub type SuiteId = String;

pub mod descriptor;
pub mod list;

pub use descriptor::{Invocation, SuiteDescriptor};
pub use list::SuiteList;
