//! Configuration management for labkit tools.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (`NEO4J_URI`, `NEO4J_USER`, `NEO4J_PASSWORD`,
//!    `NEO4J_DATABASE` for the connection; `LABKIT__SECTION__KEY` otherwise)
//! 2. Config file (labkit.toml)
//! 3. Defaults

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{LabkitError, Result};

/// Connection settings for the course database.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Neo4jSettings {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// The course dataset lives in its own database, not the default one.
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_uri() -> String {
    "neo4j://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

fn default_database() -> String {
    "insurance".to_string()
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            database: default_database(),
        }
    }
}

/// Loaded configuration layers.
pub struct Settings {
    layered: Config,
    neo4j_env: Config,
}

impl Settings {
    /// Load `<file_prefix>.toml` (optional) plus environment overrides.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let layered = Config::builder()
            .add_source(File::with_name(file_prefix).required(false))
            .add_source(
                Environment::with_prefix("LABKIT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let neo4j_env = Config::builder()
            .add_source(Environment::with_prefix("NEO4J").prefix_separator("_"))
            .build()?;

        Ok(Self { layered, neo4j_env })
    }

    /// Build settings from TOML text alone, without touching the environment.
    pub fn from_toml(text: &str) -> Result<Self> {
        let layered = Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()?;
        Ok(Self {
            layered,
            neo4j_env: Config::default(),
        })
    }

    /// Connection settings: `[neo4j]` section, then `NEO4J_*` overrides.
    pub fn neo4j(&self) -> Result<Neo4jSettings> {
        let mut settings: Neo4jSettings = self.section("neo4j")?;

        if let Ok(uri) = self.neo4j_env.get_string("uri") {
            settings.uri = uri;
        }
        if let Ok(user) = self.neo4j_env.get_string("user") {
            settings.user = user;
        }
        if let Ok(password) = self.neo4j_env.get_string("password") {
            settings.password = password;
        }
        if let Ok(database) = self.neo4j_env.get_string("database") {
            settings.database = database;
        }

        Ok(settings)
    }

    /// Deserialize a named section. An absent section yields its defaults;
    /// a present but malformed one is an error rather than a silent reset.
    pub fn section<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.layered.get::<T>(key) {
            Ok(section) => Ok(section),
            Err(ConfigError::NotFound(_)) => {
                tracing::debug!(section = key, "Using default configuration section");
                Ok(T::default())
            }
            Err(e) => Err(LabkitError::Config(format!("[{key}] {e}"))),
        }
    }
}
