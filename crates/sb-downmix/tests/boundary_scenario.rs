//! End-to-end boundary scenario for the ITU-R BS.775 fold-down.

use sb_core::{ch51, ch714, AudioBuffer};
use sb_downmix::downmix_714_to_51;

#[test]
fn top_front_left_only_routes_to_front_left_and_not_to_side_left() {
    let mut bed = AudioBuffer::zeros(4, ch714::COUNT, 48_000);
    bed.add_to_channel(ch714::TFL, &[1.0, 1.0, 1.0, 1.0]);

    let out = downmix_714_to_51(&bed);

    // TFL contributes 0.5 to FL_51 and nothing to SL_51; since it is the
    // only non-silent input channel, peak normalization scales FL_51 up to
    // the -1 dBFS target and leaves every other channel at zero.
    let target = sb_dsp::db_to_linear(-1.0);
    for &s in &out.channel(ch51::FL) {
        assert!((s - target).abs() < 1e-9);
    }
    for &ch in &[ch51::FR, ch51::FC, ch51::LFE, ch51::SL, ch51::SR] {
        assert!(out.channel(ch).iter().all(|&v| v == 0.0));
    }
}
