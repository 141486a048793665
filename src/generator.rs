//! External diagram generator invocation.
//!
//! The generator is a black box called once per run as
//! `<tool> <output-dir> <descriptor>...`. It is expected to leave
//! `<name>-bare.svg`, `<name>-compact.svg` and `<name>.svg` for every crate
//! in the output directory, but nothing here checks that.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::SubprocessError;
use crate::fetch::CloneResult;
use crate::process::run_inherited;

/// Default generator executable, resolved through `PATH`.
pub const DEFAULT_GENERATOR: &str = "gen_diagrams";

/// The diagram generator executable.
#[derive(Debug, Clone)]
pub struct DiagramTool {
    program: PathBuf,
}

impl DiagramTool {
    /// Uses `program` as the generator.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Builds the single combined command line for all clones.
    #[must_use]
    pub fn command(&self, output_dir: &Path, clones: &[CloneResult]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(output_dir)
            .args(clones.iter().map(CloneResult::descriptor));
        cmd
    }

    /// Runs the generator and waits for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the generator cannot be started or exits
    /// unsuccessfully.
    pub fn run(&self, output_dir: &Path, clones: &[CloneResult]) -> Result<(), SubprocessError> {
        run_inherited(&mut self.command(output_dir, clones), "diagram generator")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn clone(name: &str, url: Option<&str>) -> CloneResult {
        CloneResult {
            name: name.to_string(),
            local_path: PathBuf::from(format!("/w/{name}")),
            source_url: url.map(str::to_string),
            last_commit: NaiveDate::from_ymd_opt(2020, 5, 17).unwrap(),
        }
    }

    #[test]
    fn command_layout() {
        let tool = DiagramTool::new("/opt/ml/gen_diagrams");
        let clones = [
            clone("log", Some("https://github.com/rust-lang/log/blob/master/{file}")),
            clone("local", None),
        ];
        let cmd = tool.command(Path::new("/w/diagrams"), &clones);

        assert_eq!(cmd.get_program(), "/opt/ml/gen_diagrams");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(
            args,
            [
                "/w/diagrams",
                "/w/log[::]https://github.com/rust-lang/log/blob/master/{file}",
                "/w/local[::]",
            ]
        );
    }

    #[test]
    fn run_reports_failure() {
        let err = DiagramTool::new("false")
            .run(Path::new("/w/diagrams"), &[clone("log", None)])
            .unwrap_err();
        assert!(matches!(
            err,
            SubprocessError::NonZeroExit {
                step: "diagram generator",
                code: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn run_succeeds() {
        assert!(DiagramTool::new("true").run(Path::new("/w/diagrams"), &[]).is_ok());
    }
}
