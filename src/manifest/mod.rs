//! Crate manifest: the JSON file listing every repository to diagram.

pub mod loader;
pub mod schema;

pub use loader::{load_manifest, parse_manifest, validate_entry};
pub use schema::{Manifest, ManifestEntry};
