//! 5.1 AAC output, derived from a 7.1.4 bed via the ITU-R downmix
//!
//! AAC encoding itself is delegated to ffmpeg: we write a temp 5.1 WAV with
//! hound, then shell out with an explicit `channelmap` filter so the encoder
//! lands channels in the FL/FR/FC/LFE/SL/SR order our downmix already
//! produces. If the channelmap invocation fails we retry with a plain
//! `-ac 6`, trading an explicit layout tag for a working file.

use std::path::{Path, PathBuf};
use std::process::Command;

use sb_core::{AudioBuffer, ProgressFn};
use sb_downmix::downmix_714_to_51;

use crate::error::{MuxError, MuxResult};
use crate::wav::write_pcm24;

const DEFAULT_BITRATE_KBPS: u32 = 320;

/// Downmix `bed` (12-channel 7.1.4) to 5.1 and AAC-encode it to `output_path`.
pub fn write_aac_51(
    bed: &AudioBuffer,
    output_path: &Path,
    bitrate_kbps: Option<u32>,
    progress: Option<&ProgressFn<'_>>,
) -> MuxResult<()> {
    sb_core::report(progress, "Downmixing 7.1.4 to 5.1 for AAC delivery...");
    let downmixed = downmix_714_to_51(bed);

    let bitrate = bitrate_kbps.unwrap_or(DEFAULT_BITRATE_KBPS);
    let temp_wav = temp_wav_path(output_path);
    write_pcm24(&downmixed, &temp_wav)?;

    sb_core::report(progress, &format!("Encoding AAC at {bitrate}kbps..."));

    let result = encode_with_channelmap(&temp_wav, output_path, bitrate);
    let result = match result {
        Ok(()) => Ok(()),
        Err(_) => {
            sb_core::report(progress, "channelmap AAC encode failed, retrying with plain -ac 6...");
            encode_plain(&temp_wav, output_path, bitrate)
        }
    };

    let _ = std::fs::remove_file(&temp_wav);
    result?;

    sb_core::report(progress, &format!("5.1 AAC output: {}", output_path.display()));
    Ok(())
}

fn temp_wav_path(output_path: &Path) -> PathBuf {
    output_path.with_extension("51.tmp.wav")
}

fn encode_with_channelmap(input_wav: &Path, output_path: &Path, bitrate_kbps: u32) -> MuxResult<()> {
    run_ffmpeg(&[
        "-y",
        "-i",
        &input_wav.to_string_lossy(),
        "-af",
        "channelmap=channel_layout=5.1",
        "-c:a",
        "aac",
        "-b:a",
        &format!("{bitrate_kbps}k"),
        &output_path.to_string_lossy(),
    ])
}

fn encode_plain(input_wav: &Path, output_path: &Path, bitrate_kbps: u32) -> MuxResult<()> {
    run_ffmpeg(&[
        "-y",
        "-i",
        &input_wav.to_string_lossy(),
        "-ac",
        "6",
        "-c:a",
        "aac",
        "-b:a",
        &format!("{bitrate_kbps}k"),
        &output_path.to_string_lossy(),
    ])
}

fn run_ffmpeg(args: &[&str]) -> MuxResult<()> {
    let output = Command::new("ffmpeg").args(args).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail: String = stderr.chars().rev().take(1000).collect::<String>().chars().rev().collect();
        return Err(MuxError::AacEncodeFailed {
            code: output.status.code(),
            stderr_tail: tail,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_wav_path_sits_alongside_the_final_output() {
        let out = Path::new("/tmp/mix.m4a");
        let temp = temp_wav_path(out);
        assert_eq!(temp.parent(), out.parent());
        assert!(temp.to_string_lossy().ends_with("51.tmp.wav"));
    }
}
