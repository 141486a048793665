//! Manifest loader
//!
//! Reads the manifest file, parses it, and checks every entry before any
//! repository is touched. Nothing is recovered: the first problem is returned.

use std::path::{Component, Path};

use tracing::debug;

use crate::error::ConfigError;
use crate::fetch::workspace::DIAGRAMS_DIR;
use crate::manifest::schema::{Manifest, ManifestEntry};

/// Loads and validates the manifest at `path`.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The content is not valid JSON or does not match the manifest schema
/// - The manifest lists no crates
/// - Any entry fails validation
pub fn load_manifest(path: &Path) -> Result<Manifest, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest = parse_manifest(&raw, path)?;
    debug!(path = %path.display(), crates = manifest.len(), "manifest loaded");
    Ok(manifest)
}

/// Parses and validates manifest text. `origin` is only used in errors.
///
/// # Errors
///
/// Same as [`load_manifest`], minus the read failure.
pub fn parse_manifest(raw: &str, origin: &Path) -> Result<Manifest, ConfigError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let manifest: Manifest = serde_json::from_str(raw).map_err(|e| ConfigError::ParseError {
        path: origin.to_path_buf(),
        line: Some(e.line()),
        message: e.to_string(),
    })?;

    if manifest.is_empty() {
        return Err(ConfigError::Empty {
            path: origin.to_path_buf(),
        });
    }

    for (name, entry) in manifest.iter() {
        validate_entry(name, entry)?;
    }

    Ok(manifest)
}

/// Checks a single entry.
///
/// The logical name doubles as the clone directory and as the stem of the
/// diagram links, so it must be a single URL-safe path component that does
/// not collide with the output directory.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` naming the first bad field.
pub fn validate_entry(name: &str, entry: &ManifestEntry) -> Result<(), ConfigError> {
    let invalid = |field: &str, value: &str, expected: &str| ConfigError::InvalidValue {
        name: name.to_string(),
        field: field.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    };

    if !is_plain_dir_name(name) {
        return Err(invalid(
            "name",
            name,
            "a directory name of ASCII letters, digits, '-', '_' or '.' not starting with '-'",
        ));
    }

    if name == DIAGRAMS_DIR {
        return Err(invalid(
            "name",
            name,
            "a name other than the output directory 'diagrams'",
        ));
    }

    if entry.git.trim().is_empty() {
        return Err(invalid("git", &entry.git, "a clone URL"));
    }

    if matches!(entry.branch.as_deref(), Some(b) if b.trim().is_empty()) {
        return Err(invalid("branch", "", "a branch name or no 'branch' key"));
    }

    if matches!(entry.crate_name.as_deref(), Some(c) if c.trim().is_empty()) {
        return Err(invalid("crate", "", "a crate name or no 'crate' key"));
    }

    let escapes = Path::new(&entry.path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(invalid(
            "path",
            &entry.path,
            "a relative path inside the repository",
        ));
    }

    Ok(())
}

fn is_plain_dir_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
