//! Global memento configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{MementoError, MementoResult};

const EVENTS_FILE: &str = "events.json";

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("memento")
}

/// Global configuration at ~/.config/memento/config.toml
#[derive(Deserialize, Clone)]
pub struct MementoConfig {
    /// Where the events file lives.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for MementoConfig {
    fn default() -> Self {
        MementoConfig {
            data_dir: default_data_dir(),
        }
    }
}

impl MementoConfig {
    pub fn config_path() -> MementoResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MementoError::Config("Could not determine config directory".into()))?
            .join("memento");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented template on first run.
    ///
    /// A config file that exists but cannot be read or parsed falls back to
    /// the defaults (logged); only an unresolvable config path is an error.
    pub fn load() -> MementoResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = match std::fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Could not read {}: {e}", config_path.display());
                return Ok(Self::default());
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                log::warn!("Invalid config in {}: {e}", config_path.display());
                Ok(Self::default())
            }
        }
    }

    /// The events file inside the configured data dir.
    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(EVENTS_FILE)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MementoResult<()> {
        let contents = format!(
            "\
# memento configuration

# Where your events file lives:
# data_dir = \"{}\"
",
            default_data_dir().display()
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MementoError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MementoError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_path_is_inside_data_dir() {
        let config = MementoConfig {
            data_dir: PathBuf::from("/tmp/memento-test"),
        };
        assert_eq!(
            config.events_path(),
            PathBuf::from("/tmp/memento-test/events.json")
        );
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let parsed: Result<MementoConfig, _> = toml::from_str("data_dir = 42");
        assert!(parsed.is_err());

        let parsed: MementoConfig = toml::from_str("").expect("empty config is valid");
        assert_eq!(parsed.data_dir, default_data_dir());
    }

    #[test]
    fn data_dir_can_be_overridden() {
        let parsed: MementoConfig =
            toml::from_str("data_dir = \"/srv/memento\"").expect("valid override");
        assert_eq!(parsed.data_dir, PathBuf::from("/srv/memento"));
    }
}
