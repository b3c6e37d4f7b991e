//! External stem-separation collaborator
//!
//! Wraps a child process (a source-separation model invoked as a
//! subprocess) that, given an input file path and a working directory,
//! writes four stereo stems under `{work_dir}/{model_name}/{basename}/`.

use std::path::{Path, PathBuf};
use std::process::Command;

use sb_core::{ProgressFn, StemSet};

use crate::error::{SeparationError, SeparationResult};
use crate::resample::resample_to;
use crate::wav_load::load_wav;

pub const DEFAULT_MODEL_NAME: &str = "htdemucs_ft";
const STEM_NAMES: [&str; 4] = ["vocals", "drums", "bass", "other"];

/// Separate `input_path` into a [`StemSet`] at `target_sample_rate`.
///
/// Invokes the separator as `python -m demucs -n {model_name} --out
/// {work_dir} {input_path}`, then loads and resamples the four stem files it
/// writes. `work_dir` is not cleaned up by this function; callers own its
/// lifecycle (e.g. a temp directory they create and remove).
pub fn separate(
    input_path: &Path,
    work_dir: &Path,
    model_name: &str,
    target_sample_rate: u32,
    progress: Option<&ProgressFn<'_>>,
) -> SeparationResult<StemSet> {
    if !input_path.is_file() {
        return Err(SeparationError::InputNotFound(input_path.display().to_string()));
    }

    sb_core::report(progress, &format!("Separating stems with {model_name}..."));

    let output = Command::new("python")
        .arg("-m")
        .arg("demucs")
        .arg("-n")
        .arg(model_name)
        .arg("--out")
        .arg(work_dir)
        .arg(input_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail: String = stderr.chars().rev().take(1000).collect::<String>().chars().rev().collect();
        return Err(SeparationError::ProcessFailed {
            code: output.status.code(),
            stderr_tail: tail,
        });
    }

    let basename = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem_dir: PathBuf = work_dir.join(model_name).join(&basename);

    let mut loaded = Vec::with_capacity(4);
    for name in STEM_NAMES {
        let path = stem_dir.join(format!("{name}.wav"));
        if !path.is_file() {
            return Err(SeparationError::MissingStem(path.display().to_string()));
        }
        let raw = load_wav(&path)?;
        let resampled = resample_to(&raw, target_sample_rate)?;
        sb_core::report(
            progress,
            &format!("  Loaded stem: {name} ({} samples)", resampled.frames()),
        );
        loaded.push(resampled);
    }

    sb_core::report(progress, "Stem separation complete.");

    let mut iter = loaded.into_iter();
    let vocals = iter.next().unwrap();
    let drums = iter.next().unwrap();
    let bass = iter.next().unwrap();
    let other = iter.next().unwrap();

    Ok(StemSet::new(vocals, drums, bass, other))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_file_is_rejected_before_spawning_a_process() {
        let result = separate(
            Path::new("/nonexistent/track.wav"),
            Path::new("/tmp"),
            DEFAULT_MODEL_NAME,
            48_000,
            None,
        );
        assert!(matches!(result, Err(SeparationError::InputNotFound(_))));
    }
}
