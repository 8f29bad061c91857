#![deny(clippy::all)]
// use log crate
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

use std::{env, process::ExitCode, time::Instant};

use clap::Parser;
use fixnoise::{command::Cli, init_log, CliError};
use fixnoise_config::{LoadConfiguration, LoggingConfig, NoiseConfiguration};

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

fn load_config() -> Result<NoiseConfiguration, CliError> {
    let exec_dir = env::current_dir().map_err(CliError::WorkingDirectory)?;
    Ok(NoiseConfiguration::load(&exec_dir)?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            init_log!(LoggingConfig::default());
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    init_log!(config.logging);

    let time = Instant::now();
    log::debug!(
        "fixnoise {CARGO_PKG_VERSION}, OS: \"{}\", ARCH: \"{}\", BUILD: \"{}\"",
        std::env::consts::OS,
        std::env::consts::ARCH,
        if cfg!(debug_assertions) {
            "Debug"
        } else {
            "Release"
        }
    );

    match cli.command.run(&config) {
        Ok(()) => {
            log::debug!("Done ({:.2?})", time.elapsed());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
