use std::{fs, io, path::Path};

use fixnoise_util::REFERENCE_TOLERANCE;
use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

pub mod logging;
pub mod table;

pub use logging::LoggingConfig;
pub use table::TableConfig;

const CONFIG_ROOT_FOLDER: &str = "config/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Couldn't access configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("Couldn't parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Couldn't serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Settings of the `fixnoise` tool. Every field falls back to its default when missing from
/// the file.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NoiseConfiguration {
    /// Agreement required between fixed-point results and host-float references in `check`.
    pub tolerance: f64,
    pub logging: LoggingConfig,
    pub table: TableConfig,
}

impl Default for NoiseConfiguration {
    fn default() -> Self {
        Self {
            tolerance: REFERENCE_TOLERANCE,
            logging: LoggingConfig::default(),
            table: TableConfig::default(),
        }
    }
}

pub trait LoadConfiguration {
    /// Loads the configuration below `exec_dir/config/`, writing the defaults there first when
    /// the file doesn't exist yet.
    fn load(exec_dir: &Path) -> Result<Self, ConfigError>
    where
        Self: Sized + Default + Serialize + DeserializeOwned,
    {
        let config_dir = exec_dir.join(CONFIG_ROOT_FOLDER);
        if !config_dir.exists() {
            log::debug!("creating new config root folder");
            fs::create_dir_all(&config_dir)?;
        }
        let path = config_dir.join(Self::get_path());

        let config = if path.exists() {
            let file_content = fs::read_to_string(&path)?;
            toml::from_str(&file_content)?
        } else {
            let content = Self::default();

            if let Err(err) = fs::write(&path, toml::to_string(&content)?) {
                warn!(
                    "Couldn't write default config to {:?}. Reason: {}",
                    &path, err
                );
            }

            content
        };

        config.validate()?;
        Ok(config)
    }

    fn get_path() -> &'static Path;

    fn validate(&self) -> Result<(), ConfigError>;
}

impl LoadConfiguration for NoiseConfiguration {
    fn get_path() -> &'static Path {
        Path::new("fixnoise.toml")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        self.table.validate()
    }
}
