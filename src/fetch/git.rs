//! Thin wrapper over the `git` command line.
//!
//! Every call names its target directory explicitly; the process working
//! directory is never changed.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, NaiveDate};

use crate::error::SubprocessError;
use crate::process::{run_captured, run_inherited};

/// Default `git` executable, resolved through `PATH`.
pub const DEFAULT_GIT: &str = "git";

/// A `git` executable.
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
}

impl Git {
    /// Uses `program` as the `git` executable.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Builds `git clone --depth=1 [--branch B] -- URL DEST`.
    #[must_use]
    pub fn clone_command(&self, url: &str, branch: Option<&str>, dest: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("clone").arg("--depth=1");
        if let Some(branch) = branch {
            cmd.arg("--branch").arg(branch);
        }
        cmd.arg("--").arg(url).arg(dest);
        cmd
    }

    /// Shallow-clones `url` into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if `git` cannot be started or the clone fails.
    pub fn shallow_clone(
        &self,
        url: &str,
        branch: Option<&str>,
        dest: &Path,
    ) -> Result<(), SubprocessError> {
        run_inherited(&mut self.clone_command(url, branch, dest), "git clone")
    }

    /// Returns the committer date of the last commit visible from `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if `git log` fails or prints something that is not
    /// an ISO-8601 timestamp.
    pub fn last_commit_date(&self, dir: &Path) -> Result<NaiveDate, SubprocessError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-C")
            .arg(dir)
            .args(["log", "-1", "--format=%cI"]);
        let stdout = run_captured(&mut cmd, "git log")?;
        parse_commit_date(&stdout)
    }
}

/// Parses `git log --format=%cI` output into the committer's calendar date.
///
/// The date is taken in the committer's own UTC offset, so a commit made at
/// 23:30 local time keeps its local day.
///
/// # Errors
///
/// Returns `SubprocessError::BadOutput` if the text is not a strict
/// ISO-8601 timestamp.
pub fn parse_commit_date(output: &str) -> Result<NaiveDate, SubprocessError> {
    let trimmed = output.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|e| SubprocessError::BadOutput {
            step: "git log",
            output: trimmed.to_string(),
            message: e.to_string(),
        })
}
