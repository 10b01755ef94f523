use crate::classify::RuleOverrides;
use crate::error::{Result, ScrubError};
use crate::index::HashAlgorithm;
use crate::util::parse_size_string;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

pub const CONFIG_ENV_VAR: &str = "SCRUBBER_CONFIG";
const CONFIG_FILE_NAME: &str = "scrubber.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    pub exclude: Vec<String>,
    /// Human size string such as "10MB".
    pub min_size: Option<String>,
    pub min_age_days: Option<u64>,
    pub top: Option<usize>,
    pub hash_algorithm: Option<String>,
}

impl ScanSettings {
    pub fn min_size_bytes(&self) -> Result<Option<u64>> {
        self.min_size
            .as_deref()
            .map(|s| parse_size_string(s).map_err(|e| ScrubError::Config(format!("scan.min_size: {}", e))))
            .transpose()
    }

    pub fn hash_algorithm(&self) -> Result<Option<HashAlgorithm>> {
        self.hash_algorithm
            .as_deref()
            .map(str::parse::<HashAlgorithm>)
            .transpose()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scan: ScanSettings,
    pub rules: RuleOverrides,
}

impl Settings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ScrubError::Config(format!("Invalid config: {}", e)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The file the settings came from, if any.
    pub config_path: Option<PathBuf>,
    pub settings: Settings,
}

impl Config {
    /// Loads settings from `--config`, then `SCRUBBER_CONFIG`, then the XDG
    /// config directory. An explicitly named file must exist; a missing XDG
    /// file just means defaults.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let explicit = config_override.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        let config_path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ScrubError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Some(path)
            }
            None => BaseDirectories::with_prefix("scrubber")
                .ok()
                .and_then(|xdg| xdg.find_config_file(CONFIG_FILE_NAME)),
        };

        match config_path {
            Some(path) => Self::from_file(&path),
            None => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Settings::from_toml_str(&content)
            .map_err(|e| ScrubError::Config(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded config from {}", path.display());

        Ok(Self {
            config_path: Some(path.to_path_buf()),
            settings,
        })
    }
}
