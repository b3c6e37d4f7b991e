//! The four-stem set produced by source separation

use crate::buffer::AudioBuffer;

/// Ordered (vocals, drums, bass, other) stem set, all stereo, same length and rate.
#[derive(Debug, Clone)]
pub struct StemSet {
    pub vocals: AudioBuffer,
    pub drums: AudioBuffer,
    pub bass: AudioBuffer,
    pub other: AudioBuffer,
}

impl StemSet {
    /// Build a stem set, enforcing the data-model invariant: mono stems are
    /// duplicated to stereo and stems of differing length are zero-padded to
    /// the longest one.
    pub fn new(vocals: AudioBuffer, drums: AudioBuffer, bass: AudioBuffer, other: AudioBuffer) -> Self {
        let vocals = vocals.to_stereo();
        let drums = drums.to_stereo();
        let bass = bass.to_stereo();
        let other = other.to_stereo();

        let max_frames = [&vocals, &drums, &bass, &other]
            .iter()
            .map(|b| b.frames())
            .max()
            .unwrap_or(0);

        let vocals = pad_to(vocals, max_frames);
        let drums = pad_to(drums, max_frames);
        let bass = pad_to(bass, max_frames);
        let other = pad_to(other, max_frames);

        Self {
            vocals,
            drums,
            bass,
            other,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.vocals.sample_rate
    }

    pub fn frames(&self) -> usize {
        self.vocals.frames()
    }
}

fn pad_to(buf: AudioBuffer, frames: usize) -> AudioBuffer {
    let needed = frames * buf.channels;
    if buf.samples.len() >= needed {
        return buf;
    }
    let mut samples = buf.samples;
    samples.resize(needed, 0.0);
    AudioBuffer {
        samples,
        channels: buf.channels,
        sample_rate: buf.sample_rate,
    }
}
