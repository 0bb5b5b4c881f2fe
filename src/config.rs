//! Configuration loading and management
//!
//! Handles parsing of the optional `tdl.toml` file in the data directory.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::model::title_case;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// User configuration
    #[serde(default)]
    pub user: UserConfig,

    /// First-run seeding configuration
    #[serde(default)]
    pub seed: SeedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: UserConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

/// User-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Username used before one is set with `tdl user set`
    #[serde(default = "default_username")]
    pub default: String,
}

fn default_username() -> String {
    "Anonymous".to_string()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            default: default_username(),
        }
    }
}

/// First-run seeding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Categories created on first run when none exist
    #[serde(default = "default_seed_categories")]
    pub categories: Vec<String>,
}

fn default_seed_categories() -> Vec<String> {
    [
        "General",
        "Shopping List",
        "Home",
        "Errands",
        "Appointments",
        "Reminders",
        "Programming",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            categories: default_seed_categories(),
        }
    }
}

impl Config {
    /// Load configuration from a `tdl.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data directory, or return defaults
    pub fn load_from_dir(data_dir: &Path) -> Self {
        let config_path = data_dir.join("tdl.toml");
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> crate::error::Result<()> {
        if self.user.default.trim().is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "user.default cannot be empty".to_string(),
            ));
        }

        if self.seed.categories.is_empty() {
            return Err(crate::error::Error::InvalidConfig(
                "seed.categories cannot be empty".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for name in &self.seed.categories {
            let normalized = title_case(name);
            if normalized.is_empty() {
                return Err(crate::error::Error::InvalidConfig(
                    "seed.categories cannot include empty entries".to_string(),
                ));
            }
            if !seen.insert(normalized.clone()) {
                return Err(crate::error::Error::InvalidConfig(format!(
                    "seed.categories has duplicate entry '{normalized}'"
                )));
            }
        }

        Ok(())
    }
}
