//! Front-end defaults file loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::configuration::ConfigOverrides;

/// Top-level configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default front-end choices.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Front-end defaults applied through the override step.
#[derive(Debug, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Generators to select when none are given on the command line.
    #[serde(default)]
    pub generators: Vec<String>,
    /// Layer the selected generators instead of picking one per image.
    pub composite: Option<bool>,
    /// Fixed seed for reproducible output.
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Overrides contributed by the file.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            generators: (!self.defaults.generators.is_empty())
                .then(|| self.defaults.generators.clone()),
            random_single: self.defaults.composite.map(|composite| !composite),
            ..ConfigOverrides::default()
        }
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `RANDIMG_CONFIG` environment variable
/// 3. `~/.config/randimg/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("RANDIMG_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/randimg/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/randimg/config.toml")
    } else {
        PathBuf::from("randimg.toml")
    }
}
