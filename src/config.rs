//! Top-level application configuration.
//!
//! Configuration is stored in `<root>/config.yaml` and includes:
//! - The actor identity stamped on mutations
//! - The persistence slot key
//! - Export format and target directory

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog_enum;
use crate::error::{DeskError, Result};
use crate::export::{CsvCapability, SpreadsheetCapability, XlsxCapability};
use crate::paths;
use crate::store::slot::validate_slot_key;
use crate::store::{DEFAULT_ACTOR, DEFAULT_STORAGE_KEY};
use crate::utils::write_atomic;

/// Keys accepted by `config set`
pub const CONFIG_KEYS: &[&str] = &["actor", "storage_key", "export.format", "export.dir"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

catalog_enum!(ExportFormat, "export format", {
    Xlsx => "xlsx",
    Csv => "csv",
});

impl ExportFormat {
    pub fn capability(&self) -> Box<dyn SpreadsheetCapability> {
        match self {
            ExportFormat::Xlsx => Box::new(XlsxCapability),
            ExportFormat::Csv => Box::new(CsvCapability),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: ExportFormat,

    /// Target directory; the current directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl ExportConfig {
    pub fn is_default(&self) -> bool {
        *self == ExportConfig::default()
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Identity recorded in `lastUpdatedBy`
    #[serde(default = "default_actor")]
    pub actor: String,

    /// Persistence slot key
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default, skip_serializing_if = "ExportConfig::is_default")]
    pub export: ExportConfig,
}

fn default_actor() -> String {
    DEFAULT_ACTOR.to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            actor: default_actor(),
            storage_key: default_storage_key(),
            export: ExportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `<root>/config.yaml`, or defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        validate_slot_key(&config.storage_key)?;
        Ok(config)
    }

    /// Save configuration to `<root>/config.yaml`
    pub fn save(&self) -> Result<()> {
        self.save_to(&paths::config_path())
    }

    /// Written through a temporary sibling; creates the parent directory.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_yaml_ng::to_string(self)?;
        write_atomic(path, content.as_bytes()).map_err(|e| {
            DeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;
        Ok(())
    }

    /// Set a value by dotted key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "actor" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err(DeskError::Config("actor cannot be empty".to_string()));
                }
                self.actor = value.to_string();
            }
            "storage_key" => {
                validate_slot_key(value)?;
                self.storage_key = value.to_string();
            }
            "export.format" => {
                self.export.format = value
                    .parse()
                    .map_err(|e: DeskError| DeskError::Config(e.to_string()))?;
            }
            "export.dir" => {
                self.export.dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => {
                return Err(DeskError::Config(format!(
                    "unknown config key '{}'. Valid keys: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Directory exports land in
    pub fn export_dir(&self) -> PathBuf {
        self.export.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "actor: {}", self.actor)?;
        writeln!(f, "storage_key: {}", self.storage_key)?;
        writeln!(f, "export.format: {}", self.export.format)?;
        match &self.export.dir {
            Some(dir) => write!(f, "export.dir: {}", dir.display()),
            None => write!(f, "export.dir: (current directory)"),
        }
    }
}
