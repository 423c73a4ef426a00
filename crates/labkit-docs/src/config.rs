//! Configuration for course maintenance.

use labkit_core::LabMapping;
use serde::Deserialize;

use crate::error::Result;

/// Course maintenance settings.
///
/// Loaded from the `[docs]` section of `labkit.toml` or `LABKIT__DOCS__`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct DocsConfig {
    #[serde(default = "default_labs_dir")]
    pub labs_dir: String,

    #[serde(default = "default_presentations_dir")]
    pub presentations_dir: String,

    /// Holds `lab_<nn>_data_reload.cypher` scripts.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// `OLD=NEW` entries. Empty means the course default mapping.
    #[serde(default)]
    pub mapping: Vec<String>,

    /// Labs whose leftover references are stripped.
    #[serde(default)]
    pub retired: Option<Vec<u32>>,
}

fn default_labs_dir() -> String {
    "labs".to_string()
}

fn default_presentations_dir() -> String {
    "presentations".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            labs_dir: default_labs_dir(),
            presentations_dir: default_presentations_dir(),
            data_dir: default_data_dir(),
            mapping: Vec::new(),
            retired: None,
        }
    }
}

impl DocsConfig {
    /// Resolve the lab mapping. CLI entries and retired labs take
    /// precedence over the config file when non-empty.
    pub fn mapping(&self, entries: &[String], retired: &[u32]) -> Result<LabMapping> {
        let default = LabMapping::course_default();
        let retired = if !retired.is_empty() {
            retired.to_vec()
        } else {
            self.retired
                .clone()
                .unwrap_or_else(|| default.retired().to_vec())
        };

        let entries: &[String] = if entries.is_empty() {
            &self.mapping
        } else {
            entries
        };
        if entries.is_empty() {
            return Ok(LabMapping::new(default.pairs(), retired)?);
        }
        Ok(LabMapping::from_entries(entries, retired)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labkit_core::config::Settings;

    #[test]
    fn test_default_config() {
        let config = DocsConfig::default();
        assert_eq!(config.labs_dir, "labs");
        assert_eq!(config.presentations_dir, "presentations");
        assert_eq!(config.data_dir, "data");

        let mapping = config.mapping(&[], &[]).unwrap();
        assert_eq!(mapping, LabMapping::course_default());
    }

    #[test]
    fn test_section_mapping_and_cli_override() {
        let settings = Settings::from_toml(
            r#"
            [docs]
            mapping = ["5=4", "6=5"]
            retired = [3]
            "#,
        )
        .unwrap();
        let config: DocsConfig = settings.section("docs").unwrap();

        let from_file = config.mapping(&[], &[]).unwrap();
        assert_eq!(from_file.get(6), Some(5));
        assert_eq!(from_file.retired(), &[3]);

        let from_cli = config.mapping(&["9=8".to_string()], &[17]).unwrap();
        assert_eq!(from_cli.get(9), Some(8));
        assert_eq!(from_cli.get(6), None);
        assert_eq!(from_cli.retired(), &[17]);
    }
}
