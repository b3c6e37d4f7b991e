//! Multichannel audio buffer shared across the pipeline

/// Sample type used throughout the pipeline (f64 for DSP precision)
pub type Sample = f64;

/// Interleaved multichannel audio buffer
///
/// Samples are stored interleaved (frame-major): `samples[frame * channels + ch]`.
/// This mirrors how stem files and mix buffers are read from / written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub samples: Vec<Sample>,
    pub channels: usize,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(channels: usize, sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            channels,
            sample_rate,
        }
    }

    pub fn zeros(frames: usize, channels: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![0.0; frames * channels],
            channels,
            sample_rate,
        }
    }

    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels
        }
    }

    /// Extract one channel as a contiguous mono vector
    pub fn channel(&self, ch: usize) -> Vec<Sample> {
        if ch >= self.channels {
            return Vec::new();
        }
        self.samples
            .iter()
            .skip(ch)
            .step_by(self.channels)
            .copied()
            .collect()
    }

    /// Overwrite one channel's data, adding (not replacing) into the buffer
    pub fn add_to_channel(&mut self, ch: usize, data: &[Sample]) {
        if ch >= self.channels {
            return;
        }
        for (i, &s) in data.iter().enumerate() {
            let idx = i * self.channels + ch;
            if idx < self.samples.len() {
                self.samples[idx] += s;
            }
        }
    }

    /// Peak absolute sample value across all channels
    pub fn peak(&self) -> Sample {
        self.samples.iter().fold(0.0_f64, |acc, &s| acc.max(s.abs()))
    }

    /// True if every channel is exactly stereo-pair shaped (2 channels)
    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }

    /// Duplicate a mono buffer to stereo, or pass a stereo buffer through.
    /// Buffers with more than 2 channels keep only the first two.
    pub fn to_stereo(&self) -> AudioBuffer {
        match self.channels {
            1 => {
                let mono = self.channel(0);
                let mut samples = Vec::with_capacity(mono.len() * 2);
                for s in mono {
                    samples.push(s);
                    samples.push(s);
                }
                AudioBuffer {
                    samples,
                    channels: 2,
                    sample_rate: self.sample_rate,
                }
            }
            2 => self.clone(),
            _ => {
                let l = self.channel(0);
                let r = self.channel(1);
                let mut samples = Vec::with_capacity(l.len() * 2);
                for i in 0..l.len() {
                    samples.push(l[i]);
                    samples.push(r[i]);
                }
                AudioBuffer {
                    samples,
                    channels: 2,
                    sample_rate: self.sample_rate,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_counts_per_channel_samples() {
        let buf = AudioBuffer::zeros(100, 2, 48000);
        assert_eq!(buf.frames(), 100);
    }

    #[test]
    fn channel_extraction_deinterleaves() {
        let mut buf = AudioBuffer::zeros(3, 2, 48000);
        buf.samples = vec![1.0, -1.0, 2.0, -2.0, 3.0, -3.0];
        assert_eq!(buf.channel(0), vec![1.0, 2.0, 3.0]);
        assert_eq!(buf.channel(1), vec![-1.0, -2.0, -3.0]);
    }

    #[test]
    fn mono_duplicates_to_stereo() {
        let mono = AudioBuffer {
            samples: vec![0.5, -0.25],
            channels: 1,
            sample_rate: 48000,
        };
        let stereo = mono.to_stereo();
        assert_eq!(stereo.channel(0), stereo.channel(1));
    }
}
