//! Errors returned by the CLI commands.

use std::io;

use thiserror::Error;

use keyloom::KeyloomError;

use crate::config::ConfigError;

/// Failure of a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Keyloom(#[from] KeyloomError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("{} of {checked} keyboards failed to load", .failures.len())]
    Check {
        checked: usize,
        failures: Vec<KeyloomError>,
    },
}
