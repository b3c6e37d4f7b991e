//! Bounded preset adaptation: nudge a [`MixPreset`] towards what the
//! analyzed material calls for, never far from the base preset.

use sb_core::{MeasurementRecord, MixPreset};

/// Adapt `base` using `measurement`. Every adjustment is clamped so the
/// result stays close to `base`; this never produces a wildly different mix,
/// only a subtly better-tuned one.
pub fn adapt_preset(base: &MixPreset, measurement: &MeasurementRecord) -> MixPreset {
    let mut p = *base;

    // Bass-heavy material: boost LFE, ease off center bass.
    if measurement.bass_energy_ratio > 0.30 {
        p.bass_lfe_gain = (p.bass_lfe_gain + 0.10).min(1.0);
        p.bass_center_gain = (p.bass_center_gain - 0.05).max(0.50);
    } else if measurement.bass_energy_ratio < 0.15 {
        p.bass_lfe_gain = (p.bass_lfe_gain - 0.10).max(0.40);
        p.bass_center_gain = (p.bass_center_gain + 0.05).min(0.85);
    }

    // Bright material: more height channel content.
    if measurement.spectral_centroid_hz > 3500.0 {
        p.other_height_gain = (p.other_height_gain + 0.06).min(0.35);
        p.drum_height_bleed = (p.drum_height_bleed + 0.04).min(0.15);
    } else if measurement.spectral_centroid_hz < 1200.0 {
        p.other_height_gain = (p.other_height_gain - 0.05).max(0.10);
    }

    // Transient-rich: less decorrelation bleed, preserve punch.
    if measurement.transient_density > 0.20 {
        p.drum_height_bleed = (p.drum_height_bleed - 0.03).max(0.03);
        p.surround_delay_ms = (p.surround_delay_ms - 3.0).max(8.0);
    } else if measurement.transient_density < 0.05 {
        p.other_side_gain = (p.other_side_gain + 0.08).min(0.80);
        p.other_rear_gain = (p.other_rear_gain + 0.06).min(0.55);
        p.surround_delay_ms = (p.surround_delay_ms + 4.0).min(25.0);
    }

    // Wide stereo: more surround spread. Very mono: stay conservative.
    if measurement.stereo_width > 0.45 {
        p.other_side_gain = (p.other_side_gain + 0.05).min(0.80);
        p.other_rear_gain = (p.other_rear_gain + 0.04).min(0.55);
        p.vocal_width_bleed = (p.vocal_width_bleed + 0.03).min(0.20);
    } else if measurement.stereo_width < 0.10 {
        p.other_side_gain = (p.other_side_gain - 0.08).max(0.40);
        p.other_rear_gain = (p.other_rear_gain - 0.05).max(0.25);
    }

    // Compressed/loud material: lower peak target slightly. Dynamic
    // material gets a touch more headroom back.
    if measurement.dynamic_range_db < 12.0 {
        p.target_peak_dbfs = -1.5;
    } else if measurement.dynamic_range_db > 30.0 {
        p.target_peak_dbfs = -0.5;
    }

    p
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_measurement() -> MeasurementRecord {
        MeasurementRecord {
            spectral_centroid_hz: 2000.0,
            bass_energy_ratio: 0.20,
            transient_density: 0.10,
            stereo_width: 0.25,
            dynamic_range_db: 18.0,
            rms_dbfs: -12.0,
            description: "balanced, moderate-bass, smooth, moderate-width".into(),
        }
    }

    #[test]
    fn neutral_measurement_leaves_preset_unchanged() {
        let base = MixPreset::default();
        let adapted = adapt_preset(&base, &flat_measurement());
        assert_eq!(base, adapted);
    }

    #[test]
    fn bass_heavy_material_boosts_lfe_and_eases_center() {
        let base = MixPreset::default();
        let mut m = flat_measurement();
        m.bass_energy_ratio = 0.45;
        let adapted = adapt_preset(&base, &m);
        assert!(adapted.bass_lfe_gain > base.bass_lfe_gain);
        assert!(adapted.bass_center_gain < base.bass_center_gain);
    }

    #[test]
    fn adjustments_are_bounded_even_for_extreme_input() {
        let base = MixPreset::default();
        let mut m = flat_measurement();
        m.bass_energy_ratio = 1.0;
        m.spectral_centroid_hz = 20_000.0;
        m.stereo_width = 1.0;
        m.dynamic_range_db = 60.0;
        let adapted = adapt_preset(&base, &m);
        assert!(adapted.bass_lfe_gain <= 1.0);
        assert!(adapted.other_height_gain <= 0.35);
        assert!(adapted.other_side_gain <= 0.80);
        assert_eq!(adapted.target_peak_dbfs, -0.5);
    }

    #[test]
    fn transient_rich_reduces_height_bleed_and_delay() {
        let base = MixPreset::default();
        let mut m = flat_measurement();
        m.transient_density = 0.5;
        let adapted = adapt_preset(&base, &m);
        assert!(adapted.drum_height_bleed < base.drum_height_bleed);
        assert!(adapted.surround_delay_ms < base.surround_delay_ms);
    }
}
