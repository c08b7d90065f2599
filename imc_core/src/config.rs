//! Configuration file support for the BMI simulator.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/imc/config.toml`.

use crate::history::{HistoryOrder, EXPORT_FILE_NAME};
use crate::{Error, Gender, MeasurementForm, Result, UnitSystem};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Initial form values
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub unit_system: UnitSystem,

    #[serde(default = "default_age")]
    pub age: u8,

    #[serde(default)]
    pub gender: Gender,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::default(),
            age: default_age(),
            gender: Gender::default(),
        }
    }
}

/// Session history behaviour
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum records kept per session, 0 for no limit
    #[serde(default)]
    pub max_records: usize,

    /// List the history table highest BMI first
    #[serde(default = "default_sort_by_bmi")]
    pub sort_by_bmi: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_records: 0,
            sort_by_bmi: default_sort_by_bmi(),
        }
    }
}

/// CSV export settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub directory: PathBuf,

    #[serde(default = "default_file_name")]
    pub file_name: String,

    /// Row order of the file; unset follows the history table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<HistoryOrder>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_dir(),
            file_name: default_file_name(),
            order: None,
        }
    }
}

impl ExportConfig {
    /// Full path of the export artifact
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

// Default value functions
fn default_age() -> u8 {
    crate::form::AGE_DEFAULT
}

fn default_sort_by_bmi() -> bool {
    true
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_name() -> String {
    EXPORT_FILE_NAME.to_string()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(config_path) if config_path.exists() => Self::load_from(&config_path),
            other => {
                tracing::info!("No config file found at {:?}, using defaults", other);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path, if the platform has a config dir
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("imc").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Reject values the form could never hold
    pub fn validate(&self) -> Result<()> {
        let age = self.input.age;
        if !(crate::form::AGE_MIN..=crate::form::AGE_MAX).contains(&age) {
            return Err(Error::Config(format!(
                "input.age must be between {} and {}, got {}",
                crate::form::AGE_MIN,
                crate::form::AGE_MAX,
                age
            )));
        }
        if self.export.file_name.trim().is_empty() {
            return Err(Error::Config("export.file_name must not be empty".into()));
        }
        Ok(())
    }

    /// Form pre-filled from the configured unit system, age and gender
    pub fn initial_form(&self) -> MeasurementForm {
        MeasurementForm {
            age: self.input.age,
            gender: self.input.gender,
            ..MeasurementForm::with_defaults(self.input.unit_system)
        }
    }

    /// Order of the history table
    pub fn display_order(&self) -> HistoryOrder {
        if self.history.sort_by_bmi {
            HistoryOrder::BmiDesc
        } else {
            HistoryOrder::Appended
        }
    }

    /// Order of the CSV export, the display order unless set explicitly
    pub fn export_order(&self) -> HistoryOrder {
        self.export.order.unwrap_or_else(|| self.display_order())
    }
}
