// Workspace Configuration
//
// *La Configuration* (The Configuration) - Search settings for a writing workspace

use crate::errors::LeCarnetError;
use anyhow::{Context, Result};
use lerecherche::SearchConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration directory inside a workspace
pub const CONFIG_DIR: &str = ".lecarnet";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".lecarnet/config.toml";

/// Workspace configuration
///
/// ```toml
/// [search]
/// title_weight = 0.4
/// body_weight = 0.3
/// tags_weight = 0.3
/// threshold = 0.3
/// max_edit_distance = 8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CarnetConfig {
    /// Search engine settings
    pub search: SearchConfig,
}

impl CarnetConfig {
    /// Load configuration from a workspace directory
    ///
    /// Looks for `.lecarnet/config.toml` in the workspace directory.
    /// If not found, returns default configuration. Missing keys take their
    /// defaults; the loaded search section is validated.
    pub fn load<P: AsRef<Path>>(workspace: P) -> Result<Self> {
        let config_path = workspace.as_ref().join(DEFAULT_CONFIG_FILE);

        if !config_path.exists() {
            tracing::debug!("No config at {:?}, using defaults", config_path);
            return Ok(CarnetConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: CarnetConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", config_path))?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load_or_default<P: AsRef<Path>>(workspace: P) -> Self {
        match Self::load(workspace) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Falling back to default configuration: {:#}", e);
                CarnetConfig::default()
            }
        }
    }

    /// Save configuration to a workspace directory
    ///
    /// Creates `.lecarnet` directory if it doesn't exist.
    pub fn save<P: AsRef<Path>>(&self, workspace: P) -> Result<()> {
        let config_dir = workspace.as_ref().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;

        let config_path = config_dir.join("config.toml");

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(&config_path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Check the search section
    pub fn validate(&self) -> std::result::Result<(), LeCarnetError> {
        self.search.validate().map_err(|e| {
            LeCarnetError::config_error(
                e.to_string(),
                Some(format!(
                    "Edit the [search] section of {} or delete it to use the defaults.",
                    DEFAULT_CONFIG_FILE
                )),
            )
        })
    }
}
