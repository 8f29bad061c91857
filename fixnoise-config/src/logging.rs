use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub threads: bool,
    pub color: bool,
    pub timestamp: bool,
    pub level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threads: false,
            color: true,
            timestamp: true,
            level: LevelFilter::Info,
        }
    }
}
