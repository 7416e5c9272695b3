use crate::types::Column;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid sample size: {samples} (need at least 2 rows to standardize)")]
    InvalidSampleSize { samples: usize },

    #[error("Invalid seed '{input}': expected an integer that fits in 64 bits")]
    InvalidSeed { input: String },

    #[error("Cannot write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Column {column} has zero variance and cannot be standardized")]
    DegenerateColumn { column: Column },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SimError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        SimError::InvalidConfig { reason: reason.into() }
    }
}

pub type SimResult<T> = Result<T, SimError>;
