//! Errors surfaced by the stem-separation collaborator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeparationError {
    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("separator process failed (exit code {code:?}):\n{stderr_tail}")]
    ProcessFailed { code: Option<i32>, stderr_tail: String },

    #[error("missing stem file: {0}")]
    MissingStem(String),

    #[error("failed to read stem file {path}: {source}")]
    ReadError { path: String, source: hound::Error },

    #[error("sample-rate conversion failed: {0}")]
    ResampleError(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SeparationResult<T> = Result<T, SeparationError>;
