//! Configuration loading.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Calendar the drafted events are inserted into.
    pub calendar_id: String,
    /// Event length in hours when `--dur` is not given.
    pub default_duration_hours: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            calendar_id: "primary".to_string(),
            default_duration_hours: 1,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Sources, later ones winning: defaults, `<config dir>/calbot/config.toml`,
    /// `path`, then `CALBOT_*` environment variables.
    pub fn load_from(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = config_dir() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("CALBOT_")).extract()
    }
}

/// Returns the platform-specific config directory for calbot.
fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("calbot"))
}
