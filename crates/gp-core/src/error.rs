use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlampressError {
    #[error("Input not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("Decompression failed: {0}")]
    Decompression(String),
    #[error("Compression failed: {0}")]
    Compression(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GlampressError>;
