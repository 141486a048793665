//! CLI argument definitions
//!
//! Clap derive structs for `diagram-batch` command-line parsing. Every
//! option can also be set through a `DIAGRAM_BATCH_*` environment variable.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::fetch::git::DEFAULT_GIT;
use crate::fetch::workspace::DEFAULT_WORKSPACE;
use crate::generator::DEFAULT_GENERATOR;
use crate::observability::LogFormat;
use crate::run::{DEFAULT_MANIFEST, RunOptions};

// ============================================================================
// Root CLI
// ============================================================================

/// Clone the crates listed in a manifest, render their diagrams, and build
/// an HTML index of the results.
#[derive(Parser, Debug)]
#[command(name = "diagram-batch", version, about)]
pub struct Cli {
    /// JSON manifest mapping crate names to repositories.
    #[arg(default_value = DEFAULT_MANIFEST, env = "DIAGRAM_BATCH_MANIFEST")]
    pub manifest: PathBuf,

    /// Scratch directory for clones and output. Wiped at startup.
    #[arg(default_value = DEFAULT_WORKSPACE, env = "DIAGRAM_BATCH_WORKSPACE")]
    pub workspace: PathBuf,

    /// Diagram generator executable.
    #[arg(long, default_value = DEFAULT_GENERATOR, env = "DIAGRAM_BATCH_GENERATOR")]
    pub generator: PathBuf,

    /// `git` executable.
    #[arg(long, default_value = DEFAULT_GIT, env = "DIAGRAM_BATCH_GIT")]
    pub git: PathBuf,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", env = "DIAGRAM_BATCH_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, default_value = "human", env = "DIAGRAM_BATCH_LOG_FORMAT")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Extracts the options the pipeline needs.
    #[must_use]
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            manifest: self.manifest.clone(),
            workspace: self.workspace.clone(),
            generator: self.generator.clone(),
            git: self.git.clone(),
        }
    }
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

// ============================================================================
// Tests
// ============================================================================
