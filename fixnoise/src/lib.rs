#![deny(clippy::all)]
// use log crate
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

use fixnoise_config::LoggingConfig;
use log::SetLoggerError;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

pub mod command;
pub mod error;

pub use error::CliError;

/// Installs the terminal logger described by `$logging`, a [`LoggingConfig`].
#[macro_export]
macro_rules! init_log {
    ($logging:expr) => {
        if let Err(err) = $crate::init_logger(&$logging) {
            log::warn!("Logger already initialized: {err}");
        }
    };
}

pub fn init_logger(logging: &LoggingConfig) -> Result<(), SetLoggerError> {
    if !logging.enabled {
        return Ok(());
    }
    let mut config = ConfigBuilder::new();
    config.set_time_level(if logging.timestamp {
        LevelFilter::Error
    } else {
        LevelFilter::Off
    });
    config.set_thread_level(if logging.threads {
        LevelFilter::Error
    } else {
        LevelFilter::Off
    });
    config.set_target_level(LevelFilter::Debug);

    let color = if logging.color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    TermLogger::init(logging.level, config.build(), TerminalMode::Mixed, color)
}
