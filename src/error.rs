//! Error types for `diagram-batch`
//!
//! Every failure is fatal for the run. The variants exist so the one-line
//! diagnostic names the failing step and so `main` can pick an exit code.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `diagram-batch` runs.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// Manifest error (missing file, invalid JSON, invalid entry)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (workspace setup, index write)
    pub const IO_ERROR: i32 = 3;

    /// External command failed (git clone, git log, diagram tool)
    pub const SUBPROCESS_ERROR: i32 = 4;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for a batch run.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Manifest loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Workspace or output directory error
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// External command error
    #[error(transparent)]
    Subprocess(#[from] SubprocessError),

    /// Index page could not be written
    #[error("could not write {}: {source}", .path.display())]
    IndexWrite {
        /// Destination of the index page
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl BatchError {
    /// Returns the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Workspace(_) | Self::IndexWrite { .. } => ExitCode::IO_ERROR,
            Self::Subprocess(_) => ExitCode::SUBPROCESS_ERROR,
        }
    }
}

// ============================================================================
// Manifest Errors
// ============================================================================

/// Manifest loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Manifest file could not be read
    #[error("failed reading manifest {}: {source}", .path.display())]
    Unreadable {
        /// Path to the manifest
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Manifest is not valid JSON or does not match the schema
    #[error("failed parsing json in {}: {message}", .path.display())]
    ParseError {
        /// Path to the manifest
        path: PathBuf,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Manifest parsed but lists no crates
    #[error("manifest {} contains no crates", .path.display())]
    Empty {
        /// Path to the manifest
        path: PathBuf,
    },

    /// A manifest entry has an unusable value
    #[error("invalid value for '{field}' in crate '{name}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Logical crate name (manifest key)
        name: String,
        /// Name of the field with invalid value
        field: String,
        /// The actual value provided
        value: String,
        /// Description of what was expected
        expected: String,
    },
}

// ============================================================================
// Workspace Errors
// ============================================================================

/// Scratch workspace and output directory errors.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Workspace could not be cleared or created
    #[error("failed initializing {}: {source}", .path.display())]
    Init {
        /// Workspace root
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Diagram output directory could not be created
    #[error("failed creating output directory {}: {source}", .path.display())]
    OutputDir {
        /// Output directory
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Declared crate subdirectory is absent after cloning
    #[error("crate '{name}' has no directory {}", .path.display())]
    MissingCrateDir {
        /// Logical crate name
        name: String,
        /// Expected directory
        path: PathBuf,
    },
}

// ============================================================================
// Subprocess Errors
// ============================================================================

/// External command errors.
#[derive(Debug, Error)]
pub enum SubprocessError {
    /// The program could not be started
    #[error("{step} failed to start ({program}): {source}")]
    SpawnFailed {
        /// Pipeline step, e.g. `git clone`
        step: &'static str,
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The program exited unsuccessfully
    #[error("{step} failed ({}); command was: {command}", exit_status_label(.code.as_ref()))]
    NonZeroExit {
        /// Pipeline step
        step: &'static str,
        /// Shell-quoted command line
        command: String,
        /// Exit code, or `None` if killed by a signal
        code: Option<i32>,
    },

    /// The program succeeded but printed something unusable
    #[error("{step} returned unexpected output '{output}': {message}")]
    BadOutput {
        /// Pipeline step
        step: &'static str,
        /// Offending output (trimmed)
        output: String,
        /// Why it was rejected
        message: String,
    },
}

fn exit_status_label(code: Option<&i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |c| format!("exit code {c}"),
    )
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for batch operations.
pub type Result<T> = std::result::Result<T, BatchError>;

// ============================================================================
// Tests
// ============================================================================
