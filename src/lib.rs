//! `diagram-batch` - batch diagram generation for a list of crates
//!
//! Clones every crate listed in a JSON manifest, runs an external diagram
//! generator over all of them in one call, and writes an HTML index that
//! links each crate's diagrams with its repository, crates.io and docs.rs
//! pages.

pub mod cli;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod index;
pub mod manifest;
pub mod observability;
pub mod process;
pub mod run;

pub use run::{RunOptions, RunSummary, run};
