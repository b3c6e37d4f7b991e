//! Linear-phase FIR crossover
//!
//! A windowed-sinc lowpass and its spectral-inversion complement, so that
//! `lowpass(x) + highpass(x)` reconstructs `x` delayed by the filter's group
//! delay to within numerical noise, with no crossover-band phase smear.

use realfft::RealFftPlanner;
use sb_core::Sample;
use std::f64::consts::PI;

/// A linear-phase two-band crossover designed around a single cutoff.
#[derive(Clone)]
pub struct Crossover {
    pub cutoff_hz: f64,
    pub sample_rate: f64,
    pub num_taps: usize,
    pub group_delay: usize,
    lowpass_taps: Vec<f64>,
    highpass_taps: Vec<f64>,
}

impl Crossover {
    /// Design a crossover at `cutoff_hz`. `num_taps` is forced odd (bumped
    /// up by one if even) so the filter has a single-sample group delay
    /// center and exactly linear phase.
    pub fn new(cutoff_hz: f64, sample_rate: f64, num_taps: usize) -> Self {
        let num_taps = if num_taps % 2 == 0 {
            num_taps + 1
        } else {
            num_taps
        };
        let group_delay = (num_taps - 1) / 2;
        let lowpass_taps = design_windowed_sinc_lowpass(cutoff_hz, sample_rate, num_taps);
        let mut highpass_taps: Vec<f64> = lowpass_taps.iter().map(|&t| -t).collect();
        highpass_taps[group_delay] += 1.0;

        Self {
            cutoff_hz,
            sample_rate,
            num_taps,
            group_delay,
            lowpass_taps,
            highpass_taps,
        }
    }

    pub fn lowpass(&self, x: &[Sample]) -> Vec<Sample> {
        convolve_truncated(x, &self.lowpass_taps)
    }

    pub fn highpass(&self, x: &[Sample]) -> Vec<Sample> {
        convolve_truncated(x, &self.highpass_taps)
    }
}

fn design_windowed_sinc_lowpass(cutoff_hz: f64, sample_rate: f64, num_taps: usize) -> Vec<f64> {
    let fc = cutoff_hz / sample_rate; // normalized, cycles/sample
    let m = (num_taps - 1) as f64;
    let center = m / 2.0;

    let mut taps: Vec<f64> = (0..num_taps)
        .map(|i| {
            let n = i as f64 - center;
            let sinc = if n.abs() < 1e-12 {
                2.0 * fc
            } else {
                (2.0 * PI * fc * n).sin() / (PI * n)
            };
            // Hann window
            let window = 0.5 - 0.5 * (2.0 * PI * i as f64 / m).cos();
            sinc * window
        })
        .collect();

    let sum: f64 = taps.iter().sum();
    if sum.abs() > 1e-12 {
        for t in taps.iter_mut() {
            *t /= sum;
        }
    }
    taps
}

/// Full linear convolution of `x` with `taps`, truncated back to `x.len()`
/// samples (i.e. the causal, delayed-by-group-delay portion of the
/// convolution that lines up sample-for-sample with the input).
fn convolve_truncated(x: &[Sample], taps: &[Sample]) -> Vec<Sample> {
    if x.is_empty() {
        return Vec::new();
    }

    let full_len = x.len() + taps.len() - 1;
    let fft_len = if full_len % 2 == 0 {
        full_len
    } else {
        full_len + 1
    };

    let mut planner = RealFftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_len);
    let ifft = planner.plan_fft_inverse(fft_len);

    let mut x_buf = fft.make_input_vec();
    x_buf[..x.len()].copy_from_slice(x);
    let mut x_spec = fft.make_output_vec();
    fft.process(&mut x_buf, &mut x_spec).unwrap();

    let mut h_buf = fft.make_input_vec();
    h_buf[..taps.len()].copy_from_slice(taps);
    let mut h_spec = fft.make_output_vec();
    fft.process(&mut h_buf, &mut h_spec).unwrap();

    for (xs, hs) in x_spec.iter_mut().zip(h_spec.iter()) {
        *xs *= *hs;
    }

    let mut y_buf = ifft.make_output_vec();
    ifft.process(&mut x_spec, &mut y_buf).unwrap();

    let norm = 1.0 / fft_len as f64;
    y_buf.truncate(x.len());
    y_buf.iter().map(|&v| v * norm).collect()
}
