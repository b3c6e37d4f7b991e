//! Errors surfaced by the output muxing collaborators

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MuxError {
    #[error("failed to write PCM WAV: {0}")]
    WavWrite(#[from] hound::Error),

    #[error("AAC encoding failed (exit code {code:?}):\n{stderr_tail}")]
    AacEncodeFailed { code: Option<i32>, stderr_tail: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MuxResult<T> = Result<T, MuxError>;
