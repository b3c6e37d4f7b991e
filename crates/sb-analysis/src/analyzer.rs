//! Spectral/dynamic analysis of a stem-separated mix's source audio
//!
//! Measures the handful of signal properties the preset adapter uses to
//! nudge a [`sb_core::MixPreset`] towards the material: spectral centroid,
//! bass energy ratio, transient density, stereo width, dynamic range, and
//! overall loudness.

use realfft::RealFftPlanner;
use sb_core::{AudioBuffer, MeasurementRecord};
use std::f64::consts::PI;

const STFT_MAX_FRAME: usize = 4096;
const BASS_CUTOFF_HZ: f64 = 250.0;
const FRAME_MS: f64 = 10.0;
const TRANSIENT_JUMP_DB: f64 = 6.0;

/// Analyze `audio` and return its raw measurements.
///
/// `audio` is expected already mixed down the way the source stereo track
/// was: stereo or mono, any sample rate.
pub fn analyze(audio: &AudioBuffer) -> MeasurementRecord {
    let sample_rate = audio.sample_rate as f64;
    let (left, right, mono) = mono_and_sides(audio);

    let (spectral_centroid_hz, bass_energy_ratio) = spectral_features(&mono, sample_rate);
    let (transient_density, dynamic_range_db) = envelope_features(&mono, sample_rate);
    let stereo_width = stereo_width(audio, &left, &right);
    let rms_dbfs = rms_dbfs(&mono);

    let description = describe(
        spectral_centroid_hz,
        bass_energy_ratio,
        transient_density,
        stereo_width,
    );

    MeasurementRecord {
        spectral_centroid_hz,
        bass_energy_ratio,
        transient_density,
        stereo_width,
        dynamic_range_db,
        rms_dbfs,
        description,
    }
}

fn mono_and_sides(audio: &AudioBuffer) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    if audio.channels >= 2 {
        let left = audio.channel(0);
        let right = audio.channel(1);
        let mono = left
            .iter()
            .zip(right.iter())
            .map(|(&l, &r)| (l + r) * 0.5)
            .collect();
        (left, right, mono)
    } else {
        let mono = audio.channel(0);
        (mono.clone(), mono.clone(), mono)
    }
}

/// Mean spectral centroid across STFT frames, and the fraction of total
/// spectral energy sitting below [`BASS_CUTOFF_HZ`].
fn spectral_features(mono: &[f64], sample_rate: f64) -> (f64, f64) {
    if mono.is_empty() {
        return (0.0, 0.0);
    }

    let frame_len = mono.len().min(STFT_MAX_FRAME).max(1);
    let hop = (frame_len / 2).max(1);
    let window: Vec<f64> = (0..frame_len)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / (frame_len - 1).max(1) as f64).cos())
        .collect();

    let mut planner = RealFftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(frame_len);
    let bin_count = frame_len / 2 + 1;
    let freqs: Vec<f64> = (0..bin_count)
        .map(|k| k as f64 * sample_rate / frame_len as f64)
        .collect();
    let bass_mask: Vec<bool> = freqs.iter().map(|&f| f < BASS_CUTOFF_HZ).collect();

    let mut centroid_sum = 0.0;
    let mut frame_count = 0usize;
    let mut total_energy = 0.0;
    let mut bass_energy = 0.0;

    let mut start = 0;
    loop {
        if start >= mono.len() {
            break;
        }
        let end = (start + frame_len).min(mono.len());
        let mut buf = fft.make_input_vec();
        for (i, s) in mono[start..end].iter().enumerate() {
            buf[i] = s * window[i];
        }
        let mut spectrum = fft.make_output_vec();
        if fft.process(&mut buf, &mut spectrum).is_err() {
            break;
        }

        let magnitudes: Vec<f64> = spectrum.iter().map(|c| (c.re * c.re + c.im * c.im).sqrt()).collect();
        let mag_sum: f64 = magnitudes.iter().sum::<f64>() + 1e-12;
        let weighted: f64 = magnitudes.iter().zip(freqs.iter()).map(|(&m, &f)| m * f).sum();
        centroid_sum += weighted / mag_sum;
        frame_count += 1;

        for (i, &m) in magnitudes.iter().enumerate() {
            let energy = m * m;
            total_energy += energy;
            if bass_mask[i] {
                bass_energy += energy;
            }
        }

        if end == mono.len() {
            break;
        }
        start += hop;
    }

    let spectral_centroid = if frame_count > 0 {
        centroid_sum / frame_count as f64
    } else {
        0.0
    };
    let bass_ratio = bass_energy / (total_energy + 1e-12);
    (spectral_centroid, bass_ratio)
}

/// Transient density (fraction of 10ms frames with a >6dB energy jump) and
/// dynamic range (95th minus 10th percentile of frame energy, in dB).
fn envelope_features(mono: &[f64], sample_rate: f64) -> (f64, f64) {
    let frame_len = ((FRAME_MS / 1000.0) * sample_rate) as usize;
    if frame_len == 0 {
        return (0.5, 20.0);
    }
    let n_frames = mono.len() / frame_len;
    if n_frames < 2 {
        return (0.5, 20.0);
    }

    let energy_db: Vec<f64> = (0..n_frames)
        .map(|i| {
            let frame = &mono[i * frame_len..(i + 1) * frame_len];
            let energy: f64 = frame.iter().map(|&s| s * s).sum();
            10.0 * (energy + 1e-12).log10()
        })
        .collect();

    let transients = energy_db
        .windows(2)
        .filter(|w| w[1] - w[0] > TRANSIENT_JUMP_DB)
        .count();
    let transient_density = (transients as f64 / n_frames as f64).clamp(0.0, 1.0);

    let mut sorted = energy_db.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let idx_hi = ((0.95 * sorted.len() as f64) as usize).min(sorted.len() - 1);
    let idx_lo = ((0.10 * sorted.len() as f64) as usize).min(sorted.len() - 1);
    let dynamic_range = sorted[idx_hi] - sorted[idx_lo];

    (transient_density, dynamic_range)
}

/// `0.0` (mono/perfectly correlated) to `1.0` (fully uncorrelated), derived
/// from the Pearson correlation coefficient between left and right.
fn stereo_width(audio: &AudioBuffer, left: &[f64], right: &[f64]) -> f64 {
    if audio.channels < 2 || left.len() < 2 {
        return 0.0;
    }
    let n = left.len() as f64;
    let mean_l = left.iter().sum::<f64>() / n;
    let mean_r = right.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_l = 0.0;
    let mut var_r = 0.0;
    for (&l, &r) in left.iter().zip(right.iter()) {
        let dl = l - mean_l;
        let dr = r - mean_r;
        cov += dl * dr;
        var_l += dl * dl;
        var_r += dr * dr;
    }

    let denom = (var_l * var_r).sqrt();
    let correlation = if denom < 1e-12 { 1.0 } else { cov / denom };
    (1.0 - correlation.abs()).clamp(0.0, 1.0)
}

fn rms_dbfs(mono: &[f64]) -> f64 {
    if mono.is_empty() {
        return -240.0;
    }
    let mean_sq = mono.iter().map(|&s| s * s).sum::<f64>() / mono.len() as f64;
    let rms = mean_sq.sqrt();
    20.0 * (rms + 1e-12).log10()
}

fn describe(centroid: f64, bass_ratio: f64, transient_density: f64, width: f64) -> String {
    let brightness = if centroid > 3000.0 {
        "bright"
    } else if centroid < 1500.0 {
        "warm"
    } else {
        "balanced"
    };
    let bass_level = if bass_ratio > 0.35 {
        "bass-heavy"
    } else if bass_ratio < 0.15 {
        "light-bass"
    } else {
        "moderate-bass"
    };
    let transient_level = if transient_density > 0.15 {
        "transient-rich"
    } else {
        "smooth"
    };
    let width_label = if width > 0.4 {
        "wide-stereo"
    } else if width < 0.15 {
        "narrow"
    } else {
        "moderate-width"
    };
    format!("{brightness}, {bass_level}, {transient_level}, {width_label}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_yields_floor_measurements() {
        let audio = AudioBuffer::zeros(48_000, 2, 48_000);
        let record = analyze(&audio);
        assert!(record.rms_dbfs < -100.0);
        assert_eq!(record.stereo_width, 0.0);
    }

    #[test]
    fn mono_signal_has_zero_stereo_width() {
        let n = 48_000;
        let mut audio = AudioBuffer::zeros(n, 2, 48_000);
        let tone: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 440.0 * i as f64 / 48_000.0).sin())
            .collect();
        audio.add_to_channel(0, &tone);
        audio.add_to_channel(1, &tone);
        let record = analyze(&audio);
        assert!(record.stereo_width < 1e-6);
    }

    #[test]
    fn low_tone_is_classified_warm_and_bass_heavy() {
        let n = 48_000;
        let mut audio = AudioBuffer::zeros(n, 2, 48_000);
        let tone: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 80.0 * i as f64 / 48_000.0).sin())
            .collect();
        audio.add_to_channel(0, &tone);
        audio.add_to_channel(1, &tone);
        let record = analyze(&audio);
        assert!(record.spectral_centroid_hz < 1500.0);
        assert!(record.bass_energy_ratio > 0.35);
        assert!(record.description.contains("warm"));
        assert!(record.description.contains("bass-heavy"));
    }

    #[test]
    fn wide_uncorrelated_noise_has_high_stereo_width() {
        let n = 48_000;
        let mut audio = AudioBuffer::zeros(n, 2, 48_000);
        let mut state_l: u64 = 12345;
        let mut state_r: u64 = 987654321;
        let mut next = |state: &mut u64| {
            *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((*state >> 33) as f64 / u32::MAX as f64) * 2.0 - 1.0
        };
        let left: Vec<f64> = (0..n).map(|_| next(&mut state_l)).collect();
        let right: Vec<f64> = (0..n).map(|_| next(&mut state_r)).collect();
        audio.add_to_channel(0, &left);
        audio.add_to_channel(1, &right);
        let record = analyze(&audio);
        assert!(record.stereo_width > 0.6);
    }
}
