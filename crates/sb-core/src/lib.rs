//! sb-core: shared types for the 7.1.4 spatial mix pipeline
//!
//! Foundational, dependency-free (besides serde/thiserror) types used across
//! every other crate in the workspace: the interleaved [`AudioBuffer`], the
//! fixed 7.1.4 / 5.1 channel-index layouts, the four-stem [`StemSet`], the
//! [`MixPreset`] configuration, and the analyzer's [`MeasurementRecord`].

mod buffer;
mod error;
mod layout;
mod measurement;
mod preset;
mod progress;
mod stems;

pub use buffer::{AudioBuffer, Sample};
pub use error::{CoreError, CoreResult};
pub use layout::{ch51, ch714, PROJECT_SAMPLE_RATE};
pub use measurement::MeasurementRecord;
pub use preset::{MixPreset, PresetQuality};
pub use progress::{report, ProgressFn};
pub use stems::StemSet;
