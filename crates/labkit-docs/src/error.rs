//! Error types for the labkit-docs crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error(transparent)]
    Core(#[from] labkit_core::LabkitError),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Refusing to rename {} over existing {}", from.display(), to.display())]
    RenameTarget { from: PathBuf, to: PathBuf },
}

pub type Result<T> = std::result::Result<T, DocsError>;
