use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "PBRIDGE_CONFIG";

const CONFIG_FILE_NAME: &str = "pbridge.toml";
const POINTER_FILE_NAME: &str = ".pbridge_config_path";

/// Keys accepted by [`Config::get`] and [`Config::set`]
pub const KNOWN_KEYS: &[&str] = &["catalogs", "flavor", "verbosity"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown config key: {0}. Supported keys: catalogs, flavor, verbosity")]
    UnknownKey(String),

    #[error("Invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Which of the two bridge modules the tooling presents itself as
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    #[default]
    Current,
    Legacy,
}

impl std::str::FromStr for Flavor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" => Ok(Flavor::Current),
            "legacy" => Ok(Flavor::Legacy),
            _ => Err(ConfigError::InvalidValue {
                key: "flavor".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flavor::Current => write!(f, "current"),
            Flavor::Legacy => write!(f, "legacy"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Catalog files or directories holding catalog files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub catalogs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor: Option<Flavor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<u8>,
}

impl Config {
    /// Resolve the config file path.
    ///
    /// Order: `PBRIDGE_CONFIG`, then a pointer file next to the default
    /// location, then `~/.config/pbridge/pbridge.toml`.
    pub fn path() -> PathBuf {
        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        let default = Self::config_dir().join(CONFIG_FILE_NAME);

        let pointer = Self::pointer_path();
        if let Ok(contents) = fs::read_to_string(&pointer) {
            let trimmed = contents.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        default
    }

    /// Directory holding the default config file and log
    pub fn config_dir() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir()
            .map(|home| home.join(".config"))
            .unwrap_or_else(|| PathBuf::from("."));

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));

        base.join("pbridge")
    }

    /// Location of the pointer file used by `config path <new>`
    pub fn pointer_path() -> PathBuf {
        Self::config_dir().join(POINTER_FILE_NAME)
    }

    /// Default directory scanned for catalogs when none are configured
    pub fn default_catalog_dir() -> PathBuf {
        Self::config_dir().join("catalogs")
    }

    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "catalogs" if !self.catalogs.is_empty() => Some(self.catalogs.join(",")),
            "flavor" => self.flavor.map(|f| f.to_string()),
            "verbosity" => self.verbosity.map(|v| v.to_string()),
            _ => None,
        }
    }

    /// Set a key from its command-line text form.
    ///
    /// `catalogs` takes a comma separated list.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "catalogs" => {
                self.catalogs = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "flavor" => self.flavor = Some(value.parse()?),
            "verbosity" => {
                let level = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
                self.verbosity = Some(level);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty() && self.flavor.is_none() && self.verbosity.is_none()
    }

    pub fn values_iter(&self) -> Vec<(&'static str, String)> {
        KNOWN_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor.unwrap_or_default()
    }
}
