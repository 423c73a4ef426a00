//! File driver shared by every rewrite.
//!
//! A rewrite is a pure function over file content. The driver reads each
//! file, applies the rewrite and writes the result back only when it
//! changed.

use std::fmt;
use std::path::{Path, PathBuf};

use labkit_core::layout;

use crate::error::{DocsError, Result};

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Updated,
    Unchanged,
    /// The rewrite did not apply to this file.
    Skipped,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated => write!(f, "updated"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub change: Change,
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        write!(f, "{name}: {}", self.change)
    }
}

/// Rewrite one file. `None` from `rewrite` skips the file.
pub fn rewrite_file<F>(path: &Path, dry_run: bool, rewrite: F) -> Result<FileChange>
where
    F: FnOnce(&Path, &str) -> Result<Option<String>>,
{
    if !path.is_file() {
        return Err(DocsError::MissingFile(path.to_path_buf()));
    }
    let content = layout::read_text(path)?;

    let change = match rewrite(path, &content)? {
        None => Change::Skipped,
        Some(updated) if updated == content => Change::Unchanged,
        Some(updated) => {
            if !dry_run {
                layout::write_text(path, &updated)?;
            }
            Change::Updated
        }
    };

    tracing::info!(file = %path.display(), %change, dry_run, "Rewrite applied");
    Ok(FileChange {
        path: path.to_path_buf(),
        change,
    })
}

/// Rewrite every file in order.
pub fn rewrite_files<F>(paths: &[PathBuf], dry_run: bool, mut rewrite: F) -> Result<Vec<FileChange>>
where
    F: FnMut(&Path, &str) -> Result<Option<String>>,
{
    paths
        .iter()
        .map(|path| rewrite_file(path, dry_run, &mut rewrite))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_only_when_changed() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        std::fs::write(&a, "Lab 8").unwrap();
        std::fs::write(&b, "no refs").unwrap();

        let changes = rewrite_files(&[a.clone(), b.clone()], false, |_, text| {
            Ok(Some(text.replace("Lab 8", "Lab 7")))
        })
        .unwrap();

        assert_eq!(changes[0].change, Change::Updated);
        assert_eq!(changes[1].change, Change::Unchanged);
        assert_eq!(std::fs::read_to_string(&a).unwrap(), "Lab 7");
        assert_eq!(changes[0].to_string(), "a.md: updated");
    }

    #[test]
    fn test_dry_run_leaves_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.md");
        std::fs::write(&a, "Lab 8").unwrap();

        let change = rewrite_file(&a, true, |_, _| Ok(Some("Lab 7".to_string()))).unwrap();
        assert_eq!(change.change, Change::Updated);
        assert_eq!(std::fs::read_to_string(&a).unwrap(), "Lab 8");
    }

    #[test]
    fn test_skip_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.md");
        std::fs::write(&a, "x").unwrap();
        assert_eq!(
            rewrite_file(&a, false, |_, _| Ok(None)).unwrap().change,
            Change::Skipped
        );

        let missing = dir.path().join("missing.html");
        assert!(matches!(
            rewrite_file(&missing, false, |_, _| Ok(None)),
            Err(DocsError::MissingFile(_))
        ));
    }
}
