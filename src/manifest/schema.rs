//! Manifest schema types.
//!
//! The manifest is a JSON object whose keys are logical crate names and whose
//! values describe where to clone each crate from. Key order is significant:
//! it is the order in which crates are cloned and listed in the index.

use indexmap::IndexMap;
use serde::Deserialize;

/// One crate to clone and diagram.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestEntry {
    /// Clone URL.
    pub git: String,

    /// Branch to check out instead of the remote's default.
    #[serde(default)]
    pub branch: Option<String>,

    /// Crate directory relative to the repository root. Empty means the root.
    pub path: String,

    /// Published crate name when it differs from the manifest key.
    #[serde(default, rename = "crate")]
    pub crate_name: Option<String>,
}

impl ManifestEntry {
    /// Name used for crates.io and docs.rs links: the `crate` override if
    /// present, otherwise the manifest key.
    #[must_use]
    pub fn registry_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.crate_name.as_deref().unwrap_or(key)
    }
}

/// Parsed manifest, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: IndexMap<String, ManifestEntry>,
}

impl Manifest {
    /// Iterates `(logical name, entry)` pairs in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Looks up an entry by logical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.get(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the manifest lists no crates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ManifestEntry)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (String, ManifestEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
