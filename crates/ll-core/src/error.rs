use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlError {
    #[error("Invalid quota table: {0}")]
    InvalidQuota(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Quota {quota} for length {length} exceeds the {limit} available placeholders")]
    PlaceholderOverflow {
        length: usize,
        quota: usize,
        limit: usize,
    },
    #[error("Found {count} undefined components:\n{detail}")]
    UndefinedComponents { count: usize, detail: String },
    #[error("Malformed table {path}, line {line}: {reason}")]
    MalformedTable {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LlError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LlError>;
