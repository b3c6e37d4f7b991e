//! 24-bit PCM WAV output, with a best-effort 7.1.4 channel-layout tag
//!
//! FFmpeg's compressed codecs all cap at 8 channels, so a full 7.1.4 bed can
//! only be delivered losslessly as WAV. We write the raw PCM ourselves via
//! hound, then shell out to re-mux the same file with an explicit
//! `-channel_layout 7.1.4` tag so DAWs and players recognize the channel
//! mapping. If that re-mux fails, the untagged WAV is still delivered.

use std::path::Path;
use std::process::Command;

use sb_core::{AudioBuffer, ProgressFn};

use crate::error::MuxResult;

const BIT_DEPTH: u32 = 24;

/// Write `bed` (must be 12-channel 7.1.4) as a 24-bit PCM WAV at `output_path`,
/// tagging the channel layout as `7.1.4` when ffmpeg is available.
pub fn write_wav_714(bed: &AudioBuffer, output_path: &Path, progress: Option<&ProgressFn<'_>>) -> MuxResult<()> {
    sb_core::report(progress, "Writing 7.1.4 WAV (24-bit, 48 kHz)...");
    write_pcm24(bed, output_path)?;

    sb_core::report(progress, "Tagging channel layout as 7.1.4...");
    if !retag_channel_layout(output_path, "7.1.4") {
        sb_core::report(progress, "FFmpeg tagging failed -- keeping untagged WAV.");
    }

    sb_core::report(progress, &format!("7.1.4 output: {}", output_path.display()));
    Ok(())
}

/// Write any multichannel buffer as 24-bit PCM with hound.
pub fn write_pcm24(buf: &AudioBuffer, output_path: &Path) -> MuxResult<()> {
    let spec = hound::WavSpec {
        channels: buf.channels as u16,
        sample_rate: buf.sample_rate,
        bits_per_sample: BIT_DEPTH as u16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(output_path, spec)?;
    let max_val = (1i64 << (BIT_DEPTH - 1)) as f64 - 1.0;
    for &sample in &buf.samples {
        let s = (sample.clamp(-1.0, 1.0) * max_val) as i32;
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Re-mux `path` in place with ffmpeg, stamping `layout` as the channel
/// layout. Returns `false` (without touching the original file) if ffmpeg
/// is unavailable or the remux fails.
fn retag_channel_layout(path: &Path, layout: &str) -> bool {
    let temp_path = path.with_extension("tagging.wav");

    let output = match Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(path)
        .arg("-c:a")
        .arg("pcm_s24le")
        .arg("-channel_layout")
        .arg(layout)
        .arg(&temp_path)
        .output()
    {
        Ok(output) => output,
        Err(_) => return false,
    };

    if !output.status.success() {
        let _ = std::fs::remove_file(&temp_path);
        return false;
    }

    std::fs::rename(&temp_path, path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_pcm24_produces_a_valid_riff_file() {
        let mut buf = AudioBuffer::zeros(100, 2, 48_000);
        buf.add_to_channel(0, &vec![0.5; 100]);
        let path = std::env::temp_dir().join("sb_io_test_pcm24.wav");

        write_pcm24(&buf, &path).unwrap();
        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[0..4], b"RIFF");

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 2);
        assert_eq!(reader.spec().bits_per_sample, 24);

        let _ = std::fs::remove_file(&path);
    }
}
