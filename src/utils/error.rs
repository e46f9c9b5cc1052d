// src/utils/error.rs
use std::time::Duration;
use thiserror::Error;

// Extraction itself has no error type: missing sections and malformed lines
// become empty collections. Only the collaborator and storage layers fail.

/// Failures while producing the raw report text.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Source file not found: {0}")]
    SourceNotFound(String),

    #[error("Compilation failed:\n{0}")]
    CompileFailed(String),

    #[error("Execution failed:\n{0}")]
    ExecutionFailed(String),

    #[error("Timed out after {1:?} during {0}")]
    Timeout(&'static str, Duration),

    #[error("Could not spawn process: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("File already exists: {0}")]
    FileExists(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Report program failed: {0}")]
    Runner(#[from] RunnerError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
