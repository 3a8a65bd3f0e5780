//! Crate-level error type shared by the configuration layer and the CLI

use crate::api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CmaError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParsingFailed(String),

    #[error("Could not determine the home directory")]
    NoHomeDir,

    #[error("No access token - run `cma auth login` or set CMA_ACCESS_TOKEN")]
    MissingAccessToken,
}

pub type Result<T> = std::result::Result<T, CmaError>;
