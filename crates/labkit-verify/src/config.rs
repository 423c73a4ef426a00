//! Configuration for lab verification.

use serde::Deserialize;

/// Verification settings.
///
/// Loaded from the `[verify]` section of `labkit.toml` or
/// `LABKIT__VERIFY__` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyConfig {
    /// Upper bound on the wall time of one lab suite.
    #[serde(default = "default_lab_timeout")]
    pub lab_timeout_secs: u64,

    /// Directory holding `neo4j_lab_*.md`.
    #[serde(default = "default_labs_dir")]
    pub labs_dir: String,

    /// Labs whose data-creation blocks seed the database before a sweep.
    #[serde(default = "default_base_data_labs")]
    pub base_data_labs: Vec<u32>,

    /// Base data is not reloaded when the database already holds more nodes.
    #[serde(default = "default_base_data_threshold")]
    pub base_data_threshold: i64,

    /// Write the JSON run report here after every run.
    #[serde(default)]
    pub report_path: Option<String>,
}

fn default_lab_timeout() -> u64 {
    120
}

fn default_labs_dir() -> String {
    "labs".to_string()
}

fn default_base_data_labs() -> Vec<u32> {
    vec![1, 2, 3]
}

fn default_base_data_threshold() -> i64 {
    100
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            lab_timeout_secs: default_lab_timeout(),
            labs_dir: default_labs_dir(),
            base_data_labs: default_base_data_labs(),
            base_data_threshold: default_base_data_threshold(),
            report_path: None,
        }
    }
}
