//! 7.1.4 spatial mixer: routes four stems into a 12-channel bed
//!
//! Routing rules:
//!
//! | Stem   | Primary channels          | Secondary (decorrelated)     |
//! |--------|---------------------------|-------------------------------|
//! | Vocals | FC                        | FL/FR stereo-side, <=15%      |
//! | Bass   | FC (>80Hz) + LFE (<80Hz)  | --                             |
//! | Drums  | FL/FR (>80Hz) + LFE       | TFL/TFR shimmer, <=10%        |
//! | Other  | SL/SR                     | BL/BR, TFL-TBR, <=25%         |
//!
//! No stem ever doubles into a channel without decorrelation: every
//! secondary cross-feed goes through the decorrelation bank first.

use sb_core::{ch714, MixPreset, ProgressFn, StemSet};
use sb_dsp::{apply_delay_ms, mid_side, peak_normalize, soft_clip, to_mono, Crossover, DecorrelationBank};

const LFE_CROSSOVER_HZ: f64 = 80.0;
const HEIGHT_HIGHPASS_HZ: f64 = 500.0;
const DECORR_SEED_BASE: u64 = 42;
const DECORR_BLEND_SURROUND: f64 = 0.40;
const DECORR_BLEND_HEIGHT: f64 = 0.65;
const VOCAL_WIDTH_BLEND: f64 = 0.30;

const D_SL: usize = 0;
const D_SR: usize = 1;
const D_BL: usize = 2;
const D_BR: usize = 3;
const D_TFL: usize = 4;
const D_TFR: usize = 5;
const D_TBL: usize = 6;
const D_TBR: usize = 7;

/// Mix `stems` into a 12-channel 7.1.4 buffer following `preset`.
///
/// `progress` receives one-line status updates as the routing stages run.
pub fn mix_to_714(
    stems: &StemSet,
    preset: &MixPreset,
    progress: Option<&ProgressFn<'_>>,
) -> sb_core::AudioBuffer {
    sb_core::report(progress, "Building spatial mix (7.1.4)...");

    let sr = stems.sample_rate() as f64;
    let n_frames = stems.frames();

    sb_core::report(progress, "  Initializing crossover filters...");
    let xo_lfe = Crossover::new(LFE_CROSSOVER_HZ, sr, preset.fir_taps);
    let xo_height = Crossover::new(HEIGHT_HIGHPASS_HZ, sr, preset.fir_taps);

    sb_core::report(progress, "  Initializing decorrelation bank...");
    let decorr = DecorrelationBank::new(sr, 8, preset.decorr_stages, DECORR_SEED_BASE);

    let mut output = sb_core::AudioBuffer::zeros(n_frames, ch714::COUNT, stems.sample_rate());

    route_vocals(&mut output, stems, preset, &xo_lfe, &decorr, progress);
    route_bass(&mut output, stems, preset, &xo_lfe, progress);
    route_drums(&mut output, stems, preset, &xo_lfe, &xo_height, &decorr, progress);
    route_other(&mut output, stems, preset, sr, &xo_lfe, &xo_height, &decorr, progress);

    sb_core::report(progress, "  Normalizing & limiting...");
    let clipped: Vec<f64> = soft_clip(&output.samples);
    let normalized = peak_normalize(&clipped, preset.target_peak_dbfs);
    output.samples = normalized;

    sb_core::report(
        progress,
        &format!(
            "  Mix complete: {} samples x {} channels",
            output.frames(),
            output.channels
        ),
    );

    output
}

fn route_vocals(
    output: &mut sb_core::AudioBuffer,
    stems: &StemSet,
    preset: &MixPreset,
    xo_lfe: &Crossover,
    decorr: &DecorrelationBank,
    progress: Option<&ProgressFn<'_>>,
) {
    sb_core::report(progress, "  Routing vocals...");
    let left = stems.vocals.channel(0);
    let right = stems.vocals.channel(1);
    let (mid, side) = mid_side(&left, &right);

    let center: Vec<f64> = xo_lfe
        .highpass(&mid)
        .iter()
        .map(|&s| s * preset.vocal_center_gain)
        .collect();
    output.add_to_channel(ch714::FC, &center);

    let side_l: Vec<f64> = side.iter().map(|&s| s * preset.vocal_width_bleed).collect();
    let side_r: Vec<f64> = side.iter().map(|&s| -s * preset.vocal_width_bleed).collect();
    output.add_to_channel(ch714::FL, &decorr.process_blended(&side_l, D_SL, VOCAL_WIDTH_BLEND));
    output.add_to_channel(ch714::FR, &decorr.process_blended(&side_r, D_SR, VOCAL_WIDTH_BLEND));
}

fn route_bass(
    output: &mut sb_core::AudioBuffer,
    stems: &StemSet,
    preset: &MixPreset,
    xo_lfe: &Crossover,
    progress: Option<&ProgressFn<'_>>,
) {
    sb_core::report(progress, "  Routing bass...");
    let bass_mono = to_mono(&stems.bass.channel(0), &stems.bass.channel(1));

    let sub: Vec<f64> = xo_lfe
        .lowpass(&bass_mono)
        .iter()
        .map(|&s| s * preset.bass_lfe_gain)
        .collect();
    output.add_to_channel(ch714::LFE, &sub);

    let body: Vec<f64> = xo_lfe
        .highpass(&bass_mono)
        .iter()
        .map(|&s| s * preset.bass_center_gain)
        .collect();
    output.add_to_channel(ch714::FC, &body);
}

fn route_drums(
    output: &mut sb_core::AudioBuffer,
    stems: &StemSet,
    preset: &MixPreset,
    xo_lfe: &Crossover,
    xo_height: &Crossover,
    decorr: &DecorrelationBank,
    progress: Option<&ProgressFn<'_>>,
) {
    sb_core::report(progress, "  Routing drums...");
    let left = stems.drums.channel(0);
    let right = stems.drums.channel(1);
    let mono = to_mono(&left, &right);

    let kick_sub: Vec<f64> = xo_lfe
        .lowpass(&mono)
        .iter()
        .map(|&s| s * preset.drum_lfe_gain)
        .collect();
    output.add_to_channel(ch714::LFE, &kick_sub);

    let front_l: Vec<f64> = xo_lfe.highpass(&left).iter().map(|&s| s * preset.drum_front_gain).collect();
    let front_r: Vec<f64> = xo_lfe.highpass(&right).iter().map(|&s| s * preset.drum_front_gain).collect();
    output.add_to_channel(ch714::FL, &front_l);
    output.add_to_channel(ch714::FR, &front_r);

    if preset.drum_height_bleed > 0.01 {
        let drum_hp = xo_height.highpass(&mono);
        let shimmer: Vec<f64> = drum_hp.iter().map(|&s| s * preset.drum_height_bleed).collect();
        output.add_to_channel(
            ch714::TFL,
            &decorr.process_blended(&shimmer, D_TFL, DECORR_BLEND_HEIGHT),
        );
        output.add_to_channel(
            ch714::TFR,
            &decorr.process_blended(&shimmer, D_TFR, DECORR_BLEND_HEIGHT),
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn route_other(
    output: &mut sb_core::AudioBuffer,
    stems: &StemSet,
    preset: &MixPreset,
    sample_rate: f64,
    xo_lfe: &Crossover,
    xo_height: &Crossover,
    decorr: &DecorrelationBank,
    progress: Option<&ProgressFn<'_>>,
) {
    sb_core::report(progress, "  Routing instruments / other...");
    let left = stems.other.channel(0);
    let right = stems.other.channel(1);
    let mono = to_mono(&left, &right);

    let left_hp = xo_lfe.highpass(&left);
    let right_hp = xo_lfe.highpass(&right);
    let mono_hp = xo_lfe.highpass(&mono);

    // Side surrounds: primary placement, Haas-delayed.
    let sl_raw: Vec<f64> = left_hp.iter().map(|&s| s * preset.other_side_gain).collect();
    let sr_raw: Vec<f64> = right_hp.iter().map(|&s| s * preset.other_side_gain).collect();
    let sl_delayed = apply_delay_ms(&sl_raw, preset.surround_delay_ms, sample_rate);
    let sr_delayed = apply_delay_ms(&sr_raw, preset.surround_delay_ms, sample_rate);
    output.add_to_channel(
        ch714::SL,
        &decorr.process_blended(&sl_delayed, D_SL, DECORR_BLEND_SURROUND),
    );
    output.add_to_channel(
        ch714::SR,
        &decorr.process_blended(&sr_delayed, D_SR, DECORR_BLEND_SURROUND),
    );

    // Back surrounds: decorrelated, extra delay on top of the surround delay.
    let total_rear_delay = preset.surround_delay_ms + preset.rear_extra_delay_ms;
    let bl_gained: Vec<f64> = left_hp.iter().map(|&s| s * preset.other_rear_gain).collect();
    let br_gained: Vec<f64> = right_hp.iter().map(|&s| s * preset.other_rear_gain).collect();
    let bl_raw = apply_delay_ms(&bl_gained, total_rear_delay, sample_rate);
    let br_raw = apply_delay_ms(&br_gained, total_rear_delay, sample_rate);
    output.add_to_channel(
        ch714::BL,
        &decorr.process_blended(&bl_raw, D_BL, DECORR_BLEND_SURROUND + 0.10),
    );
    output.add_to_channel(
        ch714::BR,
        &decorr.process_blended(&br_raw, D_BR, DECORR_BLEND_SURROUND + 0.10),
    );

    // Height channels: ambient content above the height highpass.
    if preset.other_height_gain > 0.01 {
        let height_hp = xo_height.highpass(&mono_hp);
        let front_height: Vec<f64> = height_hp.iter().map(|&s| s * preset.other_height_gain).collect();
        let back_height: Vec<f64> = height_hp
            .iter()
            .map(|&s| s * preset.other_height_gain * 0.8)
            .collect();

        output.add_to_channel(
            ch714::TFL,
            &decorr.process_blended(&front_height, D_TFL, DECORR_BLEND_HEIGHT),
        );
        output.add_to_channel(
            ch714::TFR,
            &decorr.process_blended(&front_height, D_TFR, DECORR_BLEND_HEIGHT),
        );
        output.add_to_channel(
            ch714::TBL,
            &decorr.process_blended(&back_height, D_TBL, DECORR_BLEND_HEIGHT + 0.10),
        );
        output.add_to_channel(
            ch714::TBR,
            &decorr.process_blended(&back_height, D_TBR, DECORR_BLEND_HEIGHT + 0.10),
        );
    }

    // Subtle front presence.
    if preset.other_front_bleed > 0.01 {
        let front_l: Vec<f64> = left_hp.iter().map(|&s| s * preset.other_front_bleed).collect();
        let front_r: Vec<f64> = right_hp.iter().map(|&s| s * preset.other_front_bleed).collect();
        output.add_to_channel(ch714::FL, &front_l);
        output.add_to_channel(ch714::FR, &front_r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_core::AudioBuffer;

    fn silent_stems(frames: usize) -> StemSet {
        StemSet::new(
            AudioBuffer::zeros(frames, 2, 48_000),
            AudioBuffer::zeros(frames, 2, 48_000),
            AudioBuffer::zeros(frames, 2, 48_000),
            AudioBuffer::zeros(frames, 2, 48_000),
        )
    }

    #[test]
    fn silence_in_gives_silence_out() {
        let stems = silent_stems(4096);
        let preset = MixPreset::low();
        let out = mix_to_714(&stems, &preset, None);
        assert_eq!(out.channels, ch714::COUNT);
        assert!(out.peak() < 1e-9);
    }

    #[test]
    fn mono_vocal_routes_to_center_channel() {
        let n = 8192;
        let mut stems = silent_stems(n);
        let tone: Vec<f64> = (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 48_000.0).sin())
            .collect();
        stems.vocals.add_to_channel(0, &tone);
        stems.vocals.add_to_channel(1, &tone);

        let preset = MixPreset::low();
        let out = mix_to_714(&stems, &preset, None);

        let center_energy: f64 = out.channel(ch714::FC).iter().map(|s| s * s).sum();
        let lfe_energy: f64 = out.channel(ch714::LFE).iter().map(|s| s * s).sum();
        assert!(center_energy > 0.0);
        assert!(center_energy > lfe_energy);
    }

    #[test]
    fn output_never_exceeds_target_peak() {
        let n = 4096;
        let mut stems = silent_stems(n);
        let loud: Vec<f64> = vec![1.0; n];
        stems.bass.add_to_channel(0, &loud);
        stems.bass.add_to_channel(1, &loud);
        stems.drums.add_to_channel(0, &loud);
        stems.drums.add_to_channel(1, &loud);

        let preset = MixPreset::default();
        let out = mix_to_714(&stems, &preset, None);
        let target_linear = sb_dsp::db_to_linear(preset.target_peak_dbfs);
        assert!(out.peak() <= target_linear + 1e-6);
    }
}
