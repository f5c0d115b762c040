use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tiletrans_engine::{ConfigError, TransposeError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read config file {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file: {0}")]
    ParseConfig(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Transpose(#[from] TransposeError),
    #[error("{elements} elements exceed the {limit} distinct values of the {format} test pattern")]
    PatternTooSmall {
        elements: usize,
        limit: u64,
        format: &'static str,
    },
    #[error("{mismatches} of {total} output elements are wrong")]
    Verification { mismatches: usize, total: usize },
}
