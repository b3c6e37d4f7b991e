//! Measurement record produced by the content analyzer

/// Spectral / dynamic measurements of a piece of program material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    pub spectral_centroid_hz: f64,
    pub bass_energy_ratio: f64,
    pub transient_density: f64,
    pub stereo_width: f64,
    pub dynamic_range_db: f64,
    pub rms_dbfs: f64,
    pub description: String,
}
