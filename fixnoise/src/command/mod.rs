use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fixnoise_config::NoiseConfiguration;

use crate::CliError;

pub mod check;
pub mod eval;
pub mod table;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "fixnoise")]
#[command(about = "Deterministic 3D simplex noise in 64.61 fixed point", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Sample single-octave noise at a point
    Noise {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(allow_negative_numbers = true)]
        z: f64,
    },
    /// Sample fractal noise at a point
    Octaves {
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
        #[arg(allow_negative_numbers = true)]
        z: f64,
        /// Number of octaves to sum
        #[arg(long, default_value_t = 1)]
        octaves: u32,
        /// Amplitude ratio between consecutive octaves
        #[arg(long, default_value_t = 1.0)]
        persistence: f64,
    },
    /// Look up the noise value at a percentile of its distribution
    Percentile {
        #[arg(allow_negative_numbers = true)]
        percentile: f64,
    },
    /// Regenerate the percentile table
    GenTable {
        /// Output path; defaults to `table.output` from the configuration
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// Verify the reference scenarios and the compiled percentile table
    Check,
}

impl Command {
    pub fn run(&self, config: &NoiseConfiguration) -> Result<(), CliError> {
        match self {
            Self::Noise { x, y, z } => eval::noise(*x, *y, *z),
            Self::Octaves {
                x,
                y,
                z,
                octaves,
                persistence,
            } => eval::octaves(*x, *y, *z, *octaves, *persistence),
            Self::Percentile { percentile } => eval::percentile(*percentile),
            Self::GenTable { out } => {
                let path = out.as_ref().unwrap_or(&config.table.output);
                table::generate_table(&config.table, path)
            }
            Self::Check => check::run(config),
        }
    }
}
