//! Repository fetching.
//!
//! Clones every manifest entry into the workspace, one after another, and
//! records what the diagram generator and the index need from each clone.
//! The first failure aborts the batch.

pub mod git;
pub mod source_url;
pub mod workspace;

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::{Result, WorkspaceError};
use crate::manifest::{Manifest, ManifestEntry};

pub use git::Git;
pub use source_url::source_url_template;
pub use workspace::Workspace;

/// Separator between the local path and the URL template in a generator
/// argument.
pub const DESCRIPTOR_SEPARATOR: &str = "[::]";

/// What one successful clone produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneResult {
    /// Logical crate name (manifest key).
    pub name: String,
    /// Absolute path of the crate directory inside the clone.
    pub local_path: PathBuf,
    /// Source-browsing URL template, if the host is recognized.
    pub source_url: Option<String>,
    /// Date of the last commit.
    pub last_commit: NaiveDate,
}

impl CloneResult {
    /// Generator argument: `<local-path>[::]<url-template-or-empty>`.
    #[must_use]
    pub fn descriptor(&self) -> OsString {
        let mut arg = OsString::from(self.local_path.as_os_str());
        arg.push(DESCRIPTOR_SEPARATOR);
        arg.push(self.source_url.as_deref().unwrap_or_default());
        arg
    }
}

/// Joins the entry's declared `path` onto its clone directory, dropping `.`
/// components so an empty path yields the clone directory itself.
#[must_use]
pub fn crate_dir(clone_dir: &Path, relative: &str) -> PathBuf {
    Path::new(relative)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .fold(clone_dir.to_path_buf(), |dir, part| dir.join(part))
}

/// Clones a single entry and reads its last commit date.
///
/// # Errors
///
/// Returns an error if the clone or `git log` fails, or if the declared
/// `path` does not exist in the checkout.
pub fn fetch_crate(
    git: &Git,
    workspace: &Workspace,
    name: &str,
    entry: &ManifestEntry,
) -> Result<CloneResult> {
    let clone_dir = workspace.clone_dir(name);
    git.shallow_clone(&entry.git, entry.branch.as_deref(), &clone_dir)?;

    let local_path = crate_dir(&clone_dir, &entry.path);
    if !local_path.is_dir() {
        return Err(WorkspaceError::MissingCrateDir {
            name: name.to_string(),
            path: local_path,
        }
        .into());
    }

    let last_commit = git.last_commit_date(&local_path)?;
    let source_url = source_url_template(&entry.git);

    info!(
        crate_name = name,
        path = %local_path.display(),
        last_commit = %last_commit,
        "cloned"
    );

    Ok(CloneResult {
        name: name.to_string(),
        local_path,
        source_url,
        last_commit,
    })
}

/// Clones every manifest entry in order.
///
/// # Errors
///
/// Returns the first error from [`fetch_crate`]; later entries are not
/// attempted.
pub fn fetch_all(git: &Git, workspace: &Workspace, manifest: &Manifest) -> Result<Vec<CloneResult>> {
    manifest
        .iter()
        .map(|(name, entry)| fetch_crate(git, workspace, name, entry))
        .collect()
}
