//! Allpass-cascade decorrelation
//!
//! Duplicating a mono or stereo signal across several surround/height
//! channels leaves the copies phase-correlated; a binaural renderer that
//! convolves each channel with a different HRTF then produces comb-filter
//! artifacts instead of a diffuse spatial image. A decorrelator scrambles
//! the phase of a signal with a cascade of randomized second-order allpass
//! sections while leaving its magnitude spectrum untouched, so each channel
//! copy becomes perceptually independent without a timbral change.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use sb_core::Sample;

use crate::biquad::{AllpassCoeffs, BiquadStage};

pub const DEFAULT_MIN_FREQ_HZ: f64 = 300.0;
pub const DEFAULT_MAX_FREQ_HZ: f64 = 2000.0;

/// A cascade of seeded, randomized allpass sections for one channel.
#[derive(Clone)]
pub struct Decorrelator {
    stages: Vec<AllpassCoeffs>,
}

impl Decorrelator {
    /// Build a decorrelator with `num_stages` cascaded allpass sections,
    /// log-spaced in `[min_freq, max_freq]`, jittered and seeded so the same
    /// seed always yields the same filter.
    pub fn new(
        sample_rate: f64,
        num_stages: usize,
        seed: u64,
        min_freq: f64,
        max_freq: f64,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let stages = (0..num_stages)
            .map(|i| {
                let fc = log_spaced_freq(min_freq, max_freq, num_stages, i);
                let jitter: f64 = rng.random_range(0.8..=1.2);
                let fc = (fc * jitter).clamp(20.0, sample_rate / 2.0 - 1.0);
                let q: f64 = rng.random_range(0.3..=2.5);
                AllpassCoeffs::design(fc, q, sample_rate)
            })
            .collect();
        Self { stages }
    }

    /// Fully decorrelated version of `x`: the magnitude spectrum is
    /// unchanged, the phase is scrambled.
    pub fn process(&self, x: &[Sample]) -> Vec<Sample> {
        let mut cascade: Vec<BiquadStage> =
            self.stages.iter().map(|&c| BiquadStage::new(c)).collect();
        x.iter()
            .map(|&sample| {
                let mut y = sample;
                for stage in cascade.iter_mut() {
                    y = stage.process_sample(y);
                }
                y
            })
            .collect()
    }

    /// `(1 - blend) * x + blend * process(x)`, `blend` in `[0, 1]`.
    pub fn process_blended(&self, x: &[Sample], blend: f64) -> Vec<Sample> {
        if x.is_empty() {
            return Vec::new();
        }
        let wet = self.process(x);
        x.iter()
            .zip(wet.iter())
            .map(|(&dry, &wet)| (1.0 - blend) * dry + blend * wet)
            .collect()
    }
}

fn log_spaced_freq(min_freq: f64, max_freq: f64, num_stages: usize, index: usize) -> f64 {
    if num_stages <= 1 {
        return min_freq;
    }
    let t = index as f64 / (num_stages - 1) as f64;
    min_freq * (max_freq / min_freq).powf(t)
}

/// A bank of `K` decorrelators, one per channel that needs a unique phase
/// response. Decorrelator `i` uses seed `seed_base + i`, so every channel is
/// mutually phase-independent of the others.
pub struct DecorrelationBank {
    decorrelators: Vec<Decorrelator>,
}

impl DecorrelationBank {
    pub fn new(sample_rate: f64, num_channels: usize, num_stages: usize, seed_base: u64) -> Self {
        Self::with_freq_range(
            sample_rate,
            num_channels,
            num_stages,
            seed_base,
            DEFAULT_MIN_FREQ_HZ,
            DEFAULT_MAX_FREQ_HZ,
        )
    }

    pub fn with_freq_range(
        sample_rate: f64,
        num_channels: usize,
        num_stages: usize,
        seed_base: u64,
        min_freq: f64,
        max_freq: f64,
    ) -> Self {
        let decorrelators = (0..num_channels)
            .map(|i| {
                Decorrelator::new(
                    sample_rate,
                    num_stages,
                    seed_base + i as u64,
                    min_freq,
                    max_freq,
                )
            })
            .collect();
        Self { decorrelators }
    }

    pub fn process(&self, x: &[Sample], channel: usize) -> Vec<Sample> {
        self.decorrelators[channel].process(x)
    }

    pub fn process_blended(&self, x: &[Sample], channel: usize, blend: f64) -> Vec<Sample> {
        self.decorrelators[channel].process_blended(x, blend)
    }
}
