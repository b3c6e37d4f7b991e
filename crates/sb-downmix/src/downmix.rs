//! ITU-R BS.775 fold-down from 7.1.4 (12 channels) to 5.1 (6 channels)
//!
//! ```text
//! FL_51  = FL + 0.707*SL + 0.500*BL + 0.500*TFL + 0.350*TBL
//! FR_51  = FR + 0.707*SR + 0.500*BR + 0.500*TFR + 0.350*TBR
//! FC_51  = FC
//! LFE_51 = LFE
//! SL_51  = SL + 0.707*BL + 0.500*TBL
//! SR_51  = SR + 0.707*BR + 0.500*TBR
//! ```

use sb_core::{ch51, ch714, AudioBuffer};
use sb_dsp::peak_normalize;

const TARGET_PEAK_DBFS: f64 = -1.0;

/// Fold a 7.1.4 buffer down to 5.1, peak-normalized to `-1.0` dBFS.
///
/// Panics if `bed.channels != 12`; the caller owns the invariant that only
/// mixer output ever reaches this function.
pub fn downmix_714_to_51(bed: &AudioBuffer) -> AudioBuffer {
    assert_eq!(bed.channels, ch714::COUNT, "downmix input must be 7.1.4");

    let fl = bed.channel(ch714::FL);
    let fr = bed.channel(ch714::FR);
    let fc = bed.channel(ch714::FC);
    let lfe = bed.channel(ch714::LFE);
    let bl = bed.channel(ch714::BL);
    let br = bed.channel(ch714::BR);
    let sl = bed.channel(ch714::SL);
    let sr = bed.channel(ch714::SR);
    let tfl = bed.channel(ch714::TFL);
    let tfr = bed.channel(ch714::TFR);
    let tbl = bed.channel(ch714::TBL);
    let tbr = bed.channel(ch714::TBR);

    let n = bed.frames();
    let mut out = AudioBuffer::zeros(n, ch51::COUNT, bed.sample_rate);

    let fl_51: Vec<f64> = (0..n)
        .map(|i| fl[i] + 0.707 * sl[i] + 0.500 * bl[i] + 0.500 * tfl[i] + 0.350 * tbl[i])
        .collect();
    let fr_51: Vec<f64> = (0..n)
        .map(|i| fr[i] + 0.707 * sr[i] + 0.500 * br[i] + 0.500 * tfr[i] + 0.350 * tbr[i])
        .collect();
    let sl_51: Vec<f64> = (0..n).map(|i| sl[i] + 0.707 * bl[i] + 0.500 * tbl[i]).collect();
    let sr_51: Vec<f64> = (0..n).map(|i| sr[i] + 0.707 * br[i] + 0.500 * tbr[i]).collect();

    out.add_to_channel(ch51::FL, &fl_51);
    out.add_to_channel(ch51::FR, &fr_51);
    out.add_to_channel(ch51::FC, &fc);
    out.add_to_channel(ch51::LFE, &lfe);
    out.add_to_channel(ch51::SL, &sl_51);
    out.add_to_channel(ch51::SR, &sr_51);

    out.samples = peak_normalize(&out.samples, TARGET_PEAK_DBFS);
    out
}
