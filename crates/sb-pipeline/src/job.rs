//! Track job definitions and per-track outcomes

use std::path::PathBuf;
use std::time::Duration;

use sb_core::PresetQuality;

/// One track to carry through the pipeline: input file in, 7.1.4 WAV (and
/// optionally a downmixed 5.1 AAC) out.
#[derive(Debug, Clone)]
pub struct TrackJob {
    pub input_path: PathBuf,
    pub output_wav_path: PathBuf,
    pub output_aac_path: Option<PathBuf>,
    pub aac_bitrate_kbps: Option<u32>,
    pub quality: PresetQuality,
    pub model_name: String,
}

impl TrackJob {
    pub fn new(input_path: impl Into<PathBuf>, output_wav_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_wav_path: output_wav_path.into(),
            output_aac_path: None,
            aac_bitrate_kbps: None,
            quality: PresetQuality::Medium,
            model_name: sb_separation::DEFAULT_MODEL_NAME.to_string(),
        }
    }

    pub fn with_aac_output(mut self, path: impl Into<PathBuf>, bitrate_kbps: Option<u32>) -> Self {
        self.output_aac_path = Some(path.into());
        self.aac_bitrate_kbps = bitrate_kbps;
        self
    }

    pub fn with_quality(mut self, quality: PresetQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }
}

/// Per-track completion status, keeping a batch run going past a single
/// track's failure (§7: ingest/separator failures are fatal for that track
/// only, never the batch).
#[derive(Debug)]
pub enum TrackOutcome {
    Success {
        input_path: PathBuf,
        wav_path: PathBuf,
        aac_path: Option<PathBuf>,
        duration: Duration,
        measurement_description: String,
    },
    Failed {
        input_path: PathBuf,
        error: String,
        duration: Duration,
    },
}

impl TrackOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TrackOutcome::Success { .. })
    }
}
