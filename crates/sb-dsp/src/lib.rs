//! sb-dsp: DSP primitives for the 7.1.4 spatial mix pipeline
//!
//! A linear-phase FIR [`Crossover`], a cascaded-allpass [`Decorrelator`] /
//! [`DecorrelationBank`] for phase decorrelation, and the gain/delay/folding
//! utilities the mixer and downmix stages build on.

mod biquad;
mod decorrelate;
mod fir;
mod utils;

pub use biquad::{AllpassCoeffs, BiquadStage};
pub use decorrelate::{DecorrelationBank, Decorrelator, DEFAULT_MAX_FREQ_HZ, DEFAULT_MIN_FREQ_HZ};
pub use fir::Crossover;
pub use utils::{
    apply_delay, apply_delay_ms, db_to_linear, linear_to_db, match_lengths, mid_side,
    peak_normalize, soft_clip, to_mono,
};
