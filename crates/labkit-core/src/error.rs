use thiserror::Error;

/// Top-level error type shared by labkit crates.
#[derive(Error, Debug)]
pub enum LabkitError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid lab number: {0} (course labs run {min}-{max})", min = crate::types::LabNumber::FIRST, max = crate::types::LabNumber::LAST)]
    InvalidLab(String),

    #[error("Invalid day: {0} (choose 1, 2, or 3)")]
    InvalidDay(String),

    #[error("Invalid lab mapping: {0}")]
    InvalidMapping(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for LabkitError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

impl LabkitError {
    pub fn io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LabkitError>;
