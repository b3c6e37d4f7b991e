//! End-to-end boundary scenarios for `mix_to_714`.

use sb_core::{ch714, AudioBuffer, MixPreset, StemSet};
use sb_mixer::mix_to_714;

fn silent_stems(frames: usize) -> StemSet {
    StemSet::new(
        AudioBuffer::zeros(frames, 2, 48_000),
        AudioBuffer::zeros(frames, 2, 48_000),
        AudioBuffer::zeros(frames, 2, 48_000),
        AudioBuffer::zeros(frames, 2, 48_000),
    )
}

fn sine(freq: f64, n: usize, sample_rate: f64) -> Vec<f64> {
    (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate).sin())
        .collect()
}

fn energy(x: &[f64]) -> f64 {
    x.iter().map(|&s| s * s).sum()
}

#[test]
fn scenario_1_silence_in_silence_out() {
    let stems = silent_stems(48_000);
    let out = mix_to_714(&stems, &MixPreset::medium(), None);
    assert_eq!(out.frames(), 48_000);
    assert_eq!(out.channels, ch714::COUNT);
    assert!(out.peak() < 1e-12);
}

#[test]
fn scenario_2_mid_only_sine_centers_and_skips_lfe() {
    let n = 48_000;
    let mut stems = silent_stems(n);
    let tone = sine(440.0, n, 48_000.0);
    stems.vocals.add_to_channel(0, &tone);
    stems.vocals.add_to_channel(1, &tone);

    let out = mix_to_714(&stems, &MixPreset::medium(), None);

    assert!(energy(&out.channel(ch714::FC)) > 0.0);
    assert!(energy(&out.channel(ch714::LFE)) < 1e-9);

    let fl = out.channel(ch714::FL);
    let fr = out.channel(ch714::FR);
    let max_diff = fl
        .iter()
        .zip(fr.iter())
        .map(|(&l, &r)| (l - r).abs())
        .fold(0.0_f64, f64::max);
    assert!(
        max_diff < 1e-9,
        "mid-only sine has no side signal, so FL should equal FR, max_diff={max_diff}"
    );
}

#[test]
fn scenario_3_bass_tone_drives_lfe_not_center() {
    let n = 48_000;
    let mut stems = silent_stems(n);
    let tone = sine(50.0, n, 48_000.0);
    stems.bass.add_to_channel(0, &tone);
    stems.bass.add_to_channel(1, &tone);

    let out = mix_to_714(&stems, &MixPreset::medium(), None);

    let lfe_energy = energy(&out.channel(ch714::LFE));
    let fc_energy = energy(&out.channel(ch714::FC));
    assert!(lfe_energy > 0.0);
    assert!(fc_energy < 1e-3 * lfe_energy.max(1e-12));

    let lfe_db = 10.0 * (lfe_energy + 1e-12).log10();
    for &ch in &[ch714::FL, ch714::FR, ch714::SL, ch714::SR, ch714::BL, ch714::BR] {
        let e = energy(&out.channel(ch));
        let db = 10.0 * (e + 1e-12).log10();
        assert!(db < lfe_db - 60.0, "channel {ch} too loud relative to LFE");
    }
}

#[test]
fn scenario_4_white_noise_other_reaches_all_surrounds_with_distinct_decorrelation() {
    let n = 48_000;
    let mut stems = silent_stems(n);
    let mut state: u64 = 0xC0FFEE;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((state >> 33) as f64 / u32::MAX as f64) * 2.0 - 1.0
    };
    let left: Vec<f64> = (0..n).map(|_| next()).collect();
    let right: Vec<f64> = (0..n).map(|_| next()).collect();
    stems.other.add_to_channel(0, &left);
    stems.other.add_to_channel(1, &right);

    let out = mix_to_714(&stems, &MixPreset::medium(), None);

    for &ch in &[
        ch714::SL,
        ch714::SR,
        ch714::BL,
        ch714::BR,
        ch714::TFL,
        ch714::TFR,
        ch714::TBL,
        ch714::TBR,
    ] {
        assert!(energy(&out.channel(ch)) > 0.0, "channel {ch} should carry energy");
    }
    assert!(energy(&out.channel(ch714::FC)) < 1e-6);

    let sl = out.channel(ch714::SL);
    let bl = out.channel(ch714::BL);
    assert_ne!(sl, bl);
}

#[test]
fn scenario_5_identical_lr_drums_give_equal_front_contributions() {
    let n = 48_000;
    let mut stems = silent_stems(n);
    let tone = sine(300.0, n, 48_000.0);
    stems.drums.add_to_channel(0, &tone);
    stems.drums.add_to_channel(1, &tone);

    let out = mix_to_714(&stems, &MixPreset::medium(), None);

    let fl = out.channel(ch714::FL);
    let fr = out.channel(ch714::FR);
    let max_diff = fl
        .iter()
        .zip(fr.iter())
        .map(|(&l, &r)| (l - r).abs())
        .fold(0.0_f64, f64::max);
    assert!(max_diff < 1e-9, "identical L==R drums should mix to equal FL/FR, max_diff={max_diff}");
}
