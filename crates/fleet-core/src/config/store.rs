//! Config store for loading and saving fleet.toml.

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::FleetConfig;

/// Environment variables that override file-based configuration.
const HOST_VAR: &str = "FLEET_HOST";
const TOKEN_VAR: &str = "FLEET_MACHINE_TOKEN";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Store rooted at the user's config directory.
    pub fn from_default_location() -> anyhow::Result<Self> {
        let global_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("fleet");
        Ok(Self::from_paths(global_dir))
    }

    /// Store rooted at an explicit directory (used by tests).
    pub fn from_paths(global_dir: PathBuf) -> Self {
        Self {
            config_path: global_dir.join("fleet.toml"),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration. A missing file yields defaults; `FLEET_HOST` and
    /// `FLEET_MACHINE_TOKEN` override whatever the file says.
    pub fn load(&self) -> anyhow::Result<FleetConfig> {
        let mut config = if self.config_path.exists() {
            let content = std::fs::read_to_string(&self.config_path).with_context(|| {
                format!("Failed to read config file: {}", self.config_path.display())
            })?;
            toml::from_str(&content).with_context(|| {
                format!("Failed to parse config file: {}", self.config_path.display())
            })?
        } else {
            FleetConfig::default()
        };

        if let Ok(host) = std::env::var(HOST_VAR) {
            config.host = host;
        }
        if let Ok(token) = std::env::var(TOKEN_VAR) {
            config.machine_token = Some(token);
        }
        Ok(config)
    }

    pub fn save(&self, config: &FleetConfig) -> anyhow::Result<()> {
        let content =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&self.config_path, content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;
        Ok(())
    }
}
