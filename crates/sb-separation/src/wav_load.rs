//! Loads a stem `.wav` file into an [`AudioBuffer`]

use sb_core::AudioBuffer;
use std::path::Path;

use crate::error::SeparationError;

/// Read a PCM wave file, regardless of integer or float sample format.
pub fn load_wav(path: &Path) -> Result<AudioBuffer, SeparationError> {
    let reader = hound::WavReader::open(path).map_err(|e| SeparationError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let spec = reader.spec();
    let channels = spec.channels as usize;
    let sample_rate = spec.sample_rate;

    let samples: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SeparationError::ReadError {
                path: path.display().to_string(),
                source: e,
            })?,
        hound::SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            let max_val = (1i64 << (bits - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / max_val))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| SeparationError::ReadError {
                    path: path.display().to_string(),
                    source: e,
                })?
        }
    };

    Ok(AudioBuffer {
        samples,
        channels,
        sample_rate,
    })
}
