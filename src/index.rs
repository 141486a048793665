//! HTML index page for a batch of diagrams.
//!
//! One table row per manifest entry, in manifest order, linking the three
//! diagram variants, the repository, crates.io and docs.rs, followed by the
//! last commit date. The page is static: no scripts, no external assets.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::BatchError;
use crate::manifest::Manifest;

/// File name of the index page inside the output directory.
pub const INDEX_FILE_NAME: &str = "index.html";

/// Diagram file variants as `(link label, file name suffix)`.
pub const DIAGRAM_VARIANTS: [(&str, &str); 3] =
    [("bare", "-bare.svg"), ("compact", "-compact.svg"), ("full", ".svg")];

const CRATES_IO_URL: &str = "https://crates.io/crates/";
const DOCS_RS_URL: &str = "https://docs.rs/";
const FOOTER_URL: &str = "https://github.com/dan-da/ml";

const HEAD: &str = r#"<html><head><style>
body { font-family: arial, helvetica, sans-serif; }
.diagrams {
    border-collapse: separate;
    border-spacing: 10px;
    background-color: #eeeeee;
}
.diagrams td {
    border: 2px solid #aaa;
    padding: 5px;
}
.even { background-color: #bbbbbb; }
.odd { background-color: #dddddd; }
thead td { text-align: center; }
</style></head>
<body>
<table class='diagrams'>
<thead>
<tr><td>Crate</td><td colspan="3">Diagrams</td><td colspan="3">References</td><td>Last Commit</td></tr>
</thead>"#;

/// Last commit date per logical crate name.
pub type CommitDates = HashMap<String, NaiveDate>;

/// Renders the full index page.
///
/// Entries without a recorded date get an empty date cell.
#[must_use]
pub fn render_index(manifest: &Manifest, dates: &CommitDates) -> String {
    let mut sections = Vec::with_capacity(manifest.len() + 2);
    sections.push(HEAD.to_string());

    for (row, (name, entry)) in manifest.iter().enumerate() {
        let class = if row % 2 == 0 { "even" } else { "odd" };
        let registry_name = entry.registry_name(name);
        let date = dates
            .get(name)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        let mut cells = vec![format!("<td>{}</td>", html_escape::encode_text(name))];
        cells.extend(DIAGRAM_VARIANTS.iter().map(|(label, suffix)| {
            link_cell(&format!("{name}{suffix}"), label)
        }));
        cells.push(link_cell(&entry.git, "repo"));
        cells.push(link_cell(&format!("{CRATES_IO_URL}{registry_name}"), "crates.io"));
        cells.push(link_cell(&format!("{DOCS_RS_URL}{registry_name}/"), "docs.rs"));
        cells.push(format!("<td>{date}</td>"));

        sections.push(format!("<tr class=\"{class}\">{}</tr>", cells.concat()));
    }

    sections.push(format!(
        "</table><p id='footer'>built with <a href='{FOOTER_URL}'>ml</a>.</p></body></html>"
    ));
    sections.join("\n")
}

/// Writes `index.html` into `output_dir` and returns its path.
///
/// # Errors
///
/// Returns `BatchError::IndexWrite` if the file cannot be written.
pub fn write_index(
    output_dir: &Path,
    manifest: &Manifest,
    dates: &CommitDates,
) -> Result<PathBuf, BatchError> {
    let path = output_dir.join(INDEX_FILE_NAME);
    std::fs::write(&path, render_index(manifest, dates)).map_err(|source| {
        BatchError::IndexWrite {
            path: path.clone(),
            source,
        }
    })?;
    info!(path = %path.display(), crates = manifest.len(), "index written");
    Ok(path)
}

fn link_cell(href: &str, label: &str) -> String {
    format!(
        "<td><a href=\"{}\">{label}</a></td>",
        html_escape::encode_double_quoted_attribute(href)
    )
}
