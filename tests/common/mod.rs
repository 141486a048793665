//! Shared helpers for `diagram-batch` integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Runs the compiled `diagram-batch` binary.
pub struct DiagramBatchProcess;

impl DiagramBatchProcess {
    /// Path of the compiled binary.
    pub fn binary() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_diagram-batch"))
    }

    /// Runs the binary with `args` and waits for it.
    pub fn spawn_command(args: &[&str]) -> Output {
        Command::new(Self::binary())
            .args(args)
            .env_remove("DIAGRAM_BATCH_LOG_LEVEL")
            .output()
            .expect("failed to run diagram-batch")
    }
}

/// Returns `true` if a `git` executable is on `PATH`.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(dir: &Path, args: &[&str], date: &str) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=Diagram Batch",
            "-c",
            "user.email=diagram-batch@example.org",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .env("GIT_AUTHOR_DATE", date)
        .env("GIT_COMMITTER_DATE", date)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

/// A local git repository usable as a clone source.
pub struct TestRepo {
    /// Repository root.
    pub path: PathBuf,
}

impl TestRepo {
    /// Creates a repository under `parent/name` with one commit dated
    /// `date` (ISO-8601) that adds `files`.
    pub fn create(parent: &Path, name: &str, date: &str, files: &[&str]) -> Self {
        let path = parent.join(name);
        std::fs::create_dir_all(&path).unwrap();
        git(&path, &["init", "-q"], date);
        let repo = Self { path };
        repo.commit(date, files);
        repo
    }

    /// Writes `files` (relative paths) and commits them dated `date`.
    pub fn commit(&self, date: &str, files: &[&str]) {
        for file in files {
            let full = self.path.join(file);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(&full, format!("// {file} at {date}\n")).unwrap();
        }
        git(&self.path, &["add", "-A"], date);
        git(&self.path, &["commit", "-q", "-m", date], date);
    }

    /// Creates and switches to a new branch.
    pub fn branch(&self, name: &str) {
        git(&self.path, &["checkout", "-q", "-b", name], "2000-01-01T00:00:00Z");
    }

    /// Switches to an existing branch.
    pub fn checkout(&self, name: &str) {
        git(&self.path, &["checkout", "-q", name], "2000-01-01T00:00:00Z");
    }

    /// `file://` URL, so shallow clones are honored.
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

/// Writes `json` as a manifest file and returns its path.
pub fn write_manifest(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("crates.json");
    std::fs::write(&path, json).unwrap();
    path
}

/// Table rows of an index page, one per crate.
pub fn index_rows(html: &str) -> Vec<&str> {
    html.lines().filter(|l| l.starts_with("<tr class=")).collect()
}
