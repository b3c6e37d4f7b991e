//! Mix preset: the 17 tunable parameters that drive the mixer

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// All gain/bleed fields must fall within this range; they are linear
/// amplitude multipliers, never dB, so anything outside `[0, 1]` is a
/// construction-time mistake rather than a valid creative choice.
const GAIN_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1.0;

/// Spatial mix parameters. Gains are linear amplitude, never dB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixPreset {
    // Vocals
    pub vocal_center_gain: f64,
    pub vocal_width_bleed: f64,

    // Bass
    pub bass_lfe_gain: f64,
    pub bass_center_gain: f64,

    // Drums
    pub drum_front_gain: f64,
    pub drum_lfe_gain: f64,
    pub drum_height_bleed: f64,

    // Other (instruments / ambience)
    pub other_side_gain: f64,
    pub other_rear_gain: f64,
    pub other_height_gain: f64,
    pub other_front_bleed: f64,

    // Delay staging
    pub surround_delay_ms: f64,
    pub rear_extra_delay_ms: f64,

    // Normalization
    pub target_peak_dbfs: f64,

    // Quality
    pub fir_taps: usize,
    pub decorr_stages: usize,
}

impl Default for MixPreset {
    /// The medium-quality preset; this is also the canonical default.
    fn default() -> Self {
        Self {
            vocal_center_gain: 0.90,
            vocal_width_bleed: 0.12,
            bass_lfe_gain: 0.80,
            bass_center_gain: 0.70,
            drum_front_gain: 0.85,
            drum_lfe_gain: 0.60,
            drum_height_bleed: 0.08,
            other_side_gain: 0.65,
            other_rear_gain: 0.40,
            other_height_gain: 0.22,
            other_front_bleed: 0.15,
            surround_delay_ms: 15.0,
            rear_extra_delay_ms: 8.0,
            target_peak_dbfs: -1.0,
            fir_taps: 511,
            decorr_stages: 10,
        }
    }
}

/// The three base quality levels a mix can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresetQuality {
    Low,
    Medium,
    High,
}

impl MixPreset {
    pub fn low() -> Self {
        Self {
            fir_taps: 255,
            decorr_stages: 6,
            ..Self::default()
        }
    }

    pub fn medium() -> Self {
        Self::default()
    }

    pub fn high() -> Self {
        Self {
            fir_taps: 1023,
            decorr_stages: 14,
            vocal_center_gain: 0.88,
            other_height_gain: 0.25,
            ..Self::default()
        }
    }

    pub fn for_quality(quality: PresetQuality) -> Self {
        match quality {
            PresetQuality::Low => Self::low(),
            PresetQuality::Medium => Self::medium(),
            PresetQuality::High => Self::high(),
        }
    }

    /// Reject an invalid preset at build time (§7): every gain/bleed field
    /// must be a linear amplitude in `[0, 1]`, delays and FIR/decorrelator
    /// sizing must be positive. Called on presets built from untrusted
    /// input (e.g. deserialized config); presets built only from this
    /// module's own constructors are already known to pass.
    pub fn validate(&self) -> CoreResult<()> {
        let gain_fields: [(&'static str, f64); 11] = [
            ("vocal_center_gain", self.vocal_center_gain),
            ("vocal_width_bleed", self.vocal_width_bleed),
            ("bass_lfe_gain", self.bass_lfe_gain),
            ("bass_center_gain", self.bass_center_gain),
            ("drum_front_gain", self.drum_front_gain),
            ("drum_lfe_gain", self.drum_lfe_gain),
            ("drum_height_bleed", self.drum_height_bleed),
            ("other_side_gain", self.other_side_gain),
            ("other_rear_gain", self.other_rear_gain),
            ("other_height_gain", self.other_height_gain),
            ("other_front_bleed", self.other_front_bleed),
        ];
        for (field, value) in gain_fields {
            if !GAIN_RANGE.contains(&value) {
                return Err(CoreError::InvalidPreset {
                    field,
                    reason: format!("{value} is outside the linear-amplitude range [0, 1]"),
                });
            }
        }

        if self.surround_delay_ms < 0.0 {
            return Err(CoreError::InvalidPreset {
                field: "surround_delay_ms",
                reason: format!("{} must not be negative", self.surround_delay_ms),
            });
        }
        if self.rear_extra_delay_ms < 0.0 {
            return Err(CoreError::InvalidPreset {
                field: "rear_extra_delay_ms",
                reason: format!("{} must not be negative", self.rear_extra_delay_ms),
            });
        }
        if self.fir_taps == 0 {
            return Err(CoreError::InvalidPreset {
                field: "fir_taps",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.decorr_stages == 0 {
            return Err(CoreError::InvalidPreset {
                field: "decorr_stages",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_presets_differ_chiefly_in_fir_and_decorr() {
        let low = MixPreset::low();
        let high = MixPreset::high();
        assert_eq!(low.fir_taps, 255);
        assert_eq!(high.fir_taps, 1023);
        assert_eq!(low.decorr_stages, 6);
        assert_eq!(high.decorr_stages, 14);
    }

    #[test]
    fn medium_matches_default() {
        assert_eq!(MixPreset::medium(), MixPreset::default());
    }

    #[test]
    fn base_presets_all_validate() {
        assert!(MixPreset::low().validate().is_ok());
        assert!(MixPreset::medium().validate().is_ok());
        assert!(MixPreset::high().validate().is_ok());
    }

    #[test]
    fn out_of_range_gain_is_rejected() {
        let preset = MixPreset {
            vocal_center_gain: 1.5,
            ..MixPreset::default()
        };
        let err = preset.validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidPreset { field: "vocal_center_gain", .. }));
    }

    #[test]
    fn zero_fir_taps_is_rejected() {
        let preset = MixPreset {
            fir_taps: 0,
            ..MixPreset::default()
        };
        assert!(preset.validate().is_err());
    }
}
