//! Error types for the labkit-verify crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Graph error: {0}")]
    Graph(#[from] labkit_graph::GraphError),

    #[error(transparent)]
    Core(#[from] labkit_core::LabkitError),

    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VerifyError>;
