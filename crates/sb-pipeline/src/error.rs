//! Error types for the end-to-end track pipeline

use thiserror::Error;

/// Errors a single track run can fail with. Each variant names which §7
/// error-handling policy governs it at the call site (the pipeline decides
/// whether to abort the batch or continue).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("failed to read input audio: {0}")]
    ReadError(String),

    #[error("stem separation failed: {0}")]
    Separation(#[from] sb_separation::SeparationError),

    #[error("output muxing failed: {0}")]
    Mux(#[from] sb_io::MuxError),

    #[error("invalid preset: {0}")]
    InvalidPreset(#[from] sb_core::CoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
