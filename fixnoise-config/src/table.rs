use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Parameters of the offline percentile table generator.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    /// Samples per axis of the cubic sampling grid.
    pub resolution: u32,
    /// Spacing between neighbouring samples.
    pub step: f64,
    /// First sample coordinate on every axis.
    pub origin: f64,
    /// Number of percentile intervals.
    pub breakpoints: u32,
    /// Where `gen-table` writes the JSON table.
    pub output: PathBuf,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            step: 0.37,
            origin: -8.0,
            breakpoints: 100,
            output: PathBuf::from("assets/percentile_table.json"),
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::Invalid(
                "table.resolution must be at least 1".to_string(),
            ));
        }
        if self.breakpoints == 0 {
            return Err(ConfigError::Invalid(
                "table.breakpoints must be at least 1".to_string(),
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "table.step must be a positive number, got {}",
                self.step
            )));
        }
        if !self.origin.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "table.origin must be finite, got {}",
                self.origin
            )));
        }
        Ok(())
    }
}
