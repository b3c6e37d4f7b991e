//! Orchestrates a single track through analysis, separation, mixing, and mux
//!
//! Stage order: load source PCM -> analyze -> adapt preset -> separate into
//! stems -> mix to 7.1.4 -> write tagged WAV -> optionally downmix to 5.1 AAC.

use std::path::Path;
use std::time::Instant;

use sb_core::{MixPreset, PresetQuality, ProgressFn};
use sb_separation::load_wav;

use crate::error::{PipelineError, PipelineResult};
use crate::job::{TrackJob, TrackOutcome};

/// Coarse pipeline stage, reported alongside free-text progress messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Loading,
    Analyzing,
    Separating,
    Mixing,
    Downmixing,
    Writing,
    Complete,
    Failed,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Coarse progress snapshot. `overall_progress` is a fixed per-stage weight
/// (not sample-accurate) since the mixer and separator run single-shot
/// rather than in streamed blocks.
#[derive(Debug, Clone)]
pub struct PipelineProgress {
    pub state: PipelineState,
    pub message: String,
    pub overall_progress: f64,
}

impl PipelineProgress {
    fn new(state: PipelineState, message: impl Into<String>) -> Self {
        let overall_progress = match state {
            PipelineState::Idle => 0.0,
            PipelineState::Loading => 0.05,
            PipelineState::Analyzing => 0.15,
            PipelineState::Separating => 0.55,
            PipelineState::Mixing => 0.85,
            PipelineState::Downmixing => 0.92,
            PipelineState::Writing => 0.97,
            PipelineState::Complete => 1.0,
            PipelineState::Failed => 0.0,
        };
        Self {
            state,
            message: message.into(),
            overall_progress,
        }
    }
}

/// Runs a single [`TrackJob`] end to end, emitting [`PipelineProgress`] via
/// `on_progress` and forwarding one-line messages to `progress` (the same
/// callback the analyzer/separator/mixer stages already take).
pub fn run_track(
    job: &TrackJob,
    work_dir: &Path,
    progress: Option<&ProgressFn<'_>>,
    mut on_progress: impl FnMut(PipelineProgress),
) -> PipelineResult<TrackOutcome> {
    let start = Instant::now();

    on_progress(PipelineProgress::new(PipelineState::Loading, "Loading source audio..."));
    let source = load_wav(&job.input_path).map_err(|e| match e {
        sb_separation::SeparationError::InputNotFound(p) => PipelineError::InputNotFound(p),
        other => PipelineError::ReadError(other.to_string()),
    })?;

    on_progress(PipelineProgress::new(PipelineState::Analyzing, "Analyzing program material..."));
    let measurement = sb_analysis::analyze(&source);
    let base_preset = MixPreset::for_quality(job.quality);
    let tuned_preset = sb_analysis::adapt_preset(&base_preset, &measurement);
    tuned_preset.validate()?;
    sb_core::report(progress, &format!("Analysis: {}", measurement.description));

    on_progress(PipelineProgress::new(PipelineState::Separating, "Separating stems..."));
    let stems = sb_separation::separate(
        &job.input_path,
        work_dir,
        &job.model_name,
        source.sample_rate,
        progress,
    )?;

    on_progress(PipelineProgress::new(PipelineState::Mixing, "Mixing to 7.1.4..."));
    let bed = sb_mixer::mix_to_714(&stems, &tuned_preset, progress);

    on_progress(PipelineProgress::new(PipelineState::Writing, "Writing 7.1.4 WAV..."));
    sb_io::write_wav_714(&bed, &job.output_wav_path, progress)?;

    let aac_path = if let Some(aac_path) = &job.output_aac_path {
        on_progress(PipelineProgress::new(PipelineState::Downmixing, "Downmixing and encoding 5.1 AAC..."));
        sb_io::write_aac_51(&bed, aac_path, job.aac_bitrate_kbps, progress)?;
        Some(aac_path.clone())
    } else {
        None
    };

    on_progress(PipelineProgress::new(PipelineState::Complete, "Track complete."));

    Ok(TrackOutcome::Success {
        input_path: job.input_path.clone(),
        wav_path: job.output_wav_path.clone(),
        aac_path,
        duration: start.elapsed(),
        measurement_description: measurement.description,
    })
}

/// Run a batch of jobs sequentially. Per §7, a single track's failure is
/// fatal only for that track; the batch continues. No inter-file
/// normalization is applied across the batch.
pub fn run_batch(
    jobs: &[TrackJob],
    work_dir: &Path,
    progress: Option<&ProgressFn<'_>>,
    mut on_progress: impl FnMut(usize, PipelineProgress),
) -> Vec<TrackOutcome> {
    jobs.iter()
        .enumerate()
        .map(|(i, job)| {
            let start = Instant::now();
            match run_track(job, work_dir, progress, |p| on_progress(i, p)) {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::warn!("track {} failed: {e}", job.input_path.display());
                    TrackOutcome::Failed {
                        input_path: job.input_path.clone(),
                        error: e.to_string(),
                        duration: start.elapsed(),
                    }
                }
            }
        })
        .collect()
}
