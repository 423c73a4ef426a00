//! Course directory layout and file naming conventions.
//!
//! Lab files are `neo4j_lab_<n>_<slug>.md`, slide decks are
//! `neo4j_presentation_<n>.html` and reload scripts are
//! `lab_<nn>_data_reload.cypher`.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::WalkDir;

use crate::error::{LabkitError, Result};

pub const LAB_PREFIX: &str = "neo4j_lab_";
pub const PRESENTATION_PREFIX: &str = "neo4j_presentation_";

static LAB_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"neo4j_lab_(\d+)").expect("lab number regex"));

/// Files directly inside `dir` named `<prefix>*.<extension>`, sorted by name.
pub fn list_files(dir: &Path, prefix: &str, extension: &str) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{extension}");
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with(prefix) && name.ends_with(&suffix) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Lab markdown files in `labs_dir`.
pub fn lab_files(labs_dir: &Path) -> Result<Vec<PathBuf>> {
    list_files(labs_dir, LAB_PREFIX, "md")
}

/// Slide decks in `presentations_dir`.
pub fn presentation_files(presentations_dir: &Path) -> Result<Vec<PathBuf>> {
    list_files(presentations_dir, PRESENTATION_PREFIX, "html")
}

/// Lab number embedded in a lab file name, e.g. 3 for
/// `neo4j_lab_3_claims_financial_modeling.md`.
pub fn lab_number(path: &Path) -> Option<u32> {
    let name = path.file_name()?.to_string_lossy();
    LAB_NUMBER
        .captures(&name)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// `neo4j_presentation_<n>.html` inside `dir`.
pub fn presentation_path(dir: &Path, n: u32) -> PathBuf {
    dir.join(format!("{PRESENTATION_PREFIX}{n}.html"))
}

/// `lab_<nn>_data_reload.cypher` inside `dir`.
pub fn data_reload_path(dir: &Path, n: u32) -> PathBuf {
    dir.join(format!("lab_{n:02}_data_reload.cypher"))
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| LabkitError::io(path, e))
}

pub fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| LabkitError::io(path, e))
}
