//! The batch pipeline: load, clone, generate, index.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::info;

use crate::error::Result;
use crate::fetch::{self, Git, Workspace};
use crate::generator::DiagramTool;
use crate::index::{CommitDates, write_index};
use crate::manifest::load_manifest;

/// Default manifest path.
pub const DEFAULT_MANIFEST: &str = "remote_crates.json";

/// Everything a run needs, independent of how it was configured.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Manifest file.
    pub manifest: PathBuf,
    /// Scratch workspace root. Wiped at the start of the run.
    pub workspace: PathBuf,
    /// Diagram generator executable.
    pub generator: PathBuf,
    /// `git` executable.
    pub git: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            workspace: PathBuf::from(fetch::workspace::DEFAULT_WORKSPACE),
            generator: PathBuf::from(crate::generator::DEFAULT_GENERATOR),
            git: PathBuf::from(fetch::git::DEFAULT_GIT),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of crates processed.
    pub crates: usize,
    /// Directory holding the diagrams and the index.
    pub output_dir: PathBuf,
    /// Path of the written index page.
    pub index_path: PathBuf,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Runs the whole batch.
///
/// The manifest is loaded before the workspace is touched, so a bad
/// manifest leaves any previous workspace in place.
///
/// # Errors
///
/// Returns the first failure of any step. Nothing after it runs; in
/// particular no index is written.
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let started = Instant::now();

    let manifest = load_manifest(&options.manifest)?;
    let workspace = Workspace::init(&options.workspace)?;
    info!(
        manifest = %options.manifest.display(),
        workspace = %workspace.root().display(),
        crates = manifest.len(),
        "starting batch"
    );

    let git = Git::new(&options.git);
    let clones = fetch::fetch_all(&git, &workspace, &manifest)?;

    let output_dir = workspace.create_diagrams_dir()?;
    DiagramTool::new(&options.generator).run(&output_dir, &clones)?;

    let dates: CommitDates = clones
        .into_iter()
        .map(|c| (c.name, c.last_commit))
        .collect();
    let index_path = write_index(&output_dir, &manifest, &dates)?;

    let elapsed = started.elapsed();
    info!(
        crates = manifest.len(),
        output = %output_dir.display(),
        elapsed = %humantime::format_duration(Duration::from_secs(elapsed.as_secs())),
        "batch finished"
    );

    Ok(RunSummary {
        crates: manifest.len(),
        output_dir,
        index_path,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BatchError, ConfigError};

    #[test]
    fn defaults() {
        let opts = RunOptions::default();
        assert_eq!(opts.manifest, PathBuf::from("remote_crates.json"));
        assert_eq!(opts.workspace, PathBuf::from("/tmp/gen_diagrams_remote"));
        assert_eq!(opts.generator, PathBuf::from("gen_diagrams"));
        assert_eq!(opts.git, PathBuf::from("git"));
    }

    #[test]
    fn missing_manifest_leaves_workspace_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let workspace = tmp.path().join("work");
        std::fs::create_dir(&workspace).unwrap();
        std::fs::write(workspace.join("keep.txt"), "previous run").unwrap();

        let opts = RunOptions {
            manifest: tmp.path().join("absent.json"),
            workspace: workspace.clone(),
            generator: PathBuf::from("true"),
            git: PathBuf::from("false"),
        };
        let err = run(&opts).unwrap_err();
        assert!(matches!(
            err,
            BatchError::Config(ConfigError::Unreadable { .. })
        ));
        assert!(workspace.join("keep.txt").exists());
    }

    #[test]
    fn clone_failure_writes_no_index() {
        let tmp = tempfile::tempdir().unwrap();
        let manifest = tmp.path().join("crates.json");
        std::fs::write(&manifest, r#"{"log": {"git": "u", "path": ""}}"#).unwrap();

        let opts = RunOptions {
            manifest,
            workspace: tmp.path().join("work"),
            generator: PathBuf::from("true"),
            git: PathBuf::from("false"),
        };
        let err = run(&opts).unwrap_err();
        assert!(matches!(err, BatchError::Subprocess(_)));
        assert!(!tmp.path().join("work/diagrams/index.html").exists());
    }
}
