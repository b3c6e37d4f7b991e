//! Shared error type for construction-time validation

use thiserror::Error;

/// Construction-time errors: invalid preset values, out-of-range gains.
/// The DSP layer itself has no recoverable error conditions (silence and
/// zero-length input pass through); this type only guards the boundary
/// where a preset is built or deserialized.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid preset field `{field}`: {reason}")]
    InvalidPreset { field: &'static str, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
