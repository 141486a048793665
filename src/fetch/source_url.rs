//! Source-browsing URL templates for known code hosts.

/// Substring that marks a clone URL as hosted on GitHub.
pub const GITHUB_HOST: &str = "github.com";

/// Suffix appended to a GitHub clone URL. `{file}` is filled in by the
/// diagram generator with a path relative to the crate.
pub const GITHUB_SOURCE_SUFFIX: &str = "/blob/master/{file}";

/// Returns the source-browsing URL template for `clone_url`, or `None` when
/// the host is not recognized.
#[must_use]
pub fn source_url_template(clone_url: &str) -> Option<String> {
    clone_url
        .contains(GITHUB_HOST)
        .then(|| format!("{clone_url}{GITHUB_SOURCE_SUFFIX}"))
}
