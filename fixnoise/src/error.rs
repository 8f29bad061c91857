use fixnoise_config::ConfigError;
use fixnoise_sampler::{table::TableError, NoiseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Noise(#[from] NoiseError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Couldn't determine working directory: {0}")]
    WorkingDirectory(std::io::Error),
    #[error("{failed} of {total} checks failed")]
    CheckFailed { failed: usize, total: usize },
}
