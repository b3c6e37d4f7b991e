//! Rational polyphase resampling to the project sample rate

use rubato::{FftFixedIn, Resampler};
use sb_core::{AudioBuffer, Sample};

use crate::error::{SeparationError, SeparationResult};

const CHUNK_SIZE_IN: usize = 4096;
const SUB_CHUNKS: usize = 2;

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Resample `buf` to `target_sr`, using up/down factors reduced by their
/// greatest common divisor (the same ratio a polyphase resampler would use).
/// A no-op when the buffer is already at the target rate.
pub fn resample_to(buf: &AudioBuffer, target_sr: u32) -> SeparationResult<AudioBuffer> {
    if buf.sample_rate == target_sr || buf.frames() == 0 {
        return Ok(AudioBuffer {
            samples: buf.samples.clone(),
            channels: buf.channels,
            sample_rate: target_sr,
        });
    }

    let g = gcd(buf.sample_rate, target_sr).max(1);
    let up = (target_sr / g) as usize;
    let down = (buf.sample_rate / g) as usize;

    let channels: Vec<Vec<Sample>> = (0..buf.channels).map(|ch| buf.channel(ch)).collect();
    let n_frames = buf.frames();

    let mut resampler = FftFixedIn::<Sample>::new(down, up, CHUNK_SIZE_IN, SUB_CHUNKS, buf.channels)
        .map_err(|e| SeparationError::ResampleError(e.to_string()))?;

    let mut out_channels: Vec<Vec<Sample>> = vec![Vec::new(); buf.channels];
    let mut pos = 0;
    while pos < n_frames {
        let needed = resampler.input_frames_next();
        let mut block: Vec<Vec<Sample>> = channels
            .iter()
            .map(|c| {
                let end = (pos + needed).min(c.len());
                let mut frame = c[pos..end].to_vec();
                frame.resize(needed, 0.0);
                frame
            })
            .collect();

        let produced = resampler
            .process(&block, None)
            .map_err(|e| SeparationError::ResampleError(e.to_string()))?;
        for (ch, samples) in out_channels.iter_mut().zip(produced.into_iter()) {
            ch.extend(samples);
        }
        block.clear();
        pos += needed;
    }

    let expected_frames = ((n_frames as f64) * up as f64 / down as f64).round() as usize;
    for ch in out_channels.iter_mut() {
        ch.truncate(expected_frames);
        ch.resize(expected_frames, 0.0);
    }

    let mut samples = vec![0.0; expected_frames * buf.channels];
    for (ch_idx, ch) in out_channels.iter().enumerate() {
        for (frame_idx, &s) in ch.iter().enumerate() {
            samples[frame_idx * buf.channels + ch_idx] = s;
        }
    }

    Ok(AudioBuffer {
        samples,
        channels: buf.channels,
        sample_rate: target_sr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_rate_is_a_no_op() {
        let buf = AudioBuffer::zeros(100, 2, 48_000);
        let out = resample_to(&buf, 48_000).unwrap();
        assert_eq!(out.samples, buf.samples);
    }

    #[test]
    fn upsampling_roughly_preserves_duration() {
        let n = 44_100;
        let mut buf = AudioBuffer::zeros(n, 1, 44_100);
        let tone: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 44_100.0).sin())
            .collect();
        buf.add_to_channel(0, &tone);

        let out = resample_to(&buf, 48_000).unwrap();
        assert_eq!(out.sample_rate, 48_000);
        let expected = (n as f64 * 48_000.0 / 44_100.0).round() as usize;
        assert!((out.frames() as i64 - expected as i64).abs() <= 4);
    }
}
