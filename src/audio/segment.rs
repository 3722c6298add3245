use std::time::Duration;

/// Decoded PCM audio: interleaved f32 samples plus the spec they carry.
/// Produced by the decoder or by silence generation, grown by appending.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSegment {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        debug_assert!(sample_rate > 0 && channels > 0);
        debug_assert!(samples.len() % channels as usize == 0);
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// A silent segment of the given duration at the given spec.
    pub fn silence(duration: Duration, sample_rate: u32, channels: u16) -> Self {
        let frames = duration.as_millis() as u64 * sample_rate as u64 / 1000;
        let samples = vec![0.0; frames as usize * channels as usize];
        Self::new(samples, sample_rate, channels)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames() as f64 / self.sample_rate as f64)
    }

    /// Append `other` after this segment. A source with a different spec is
    /// converted to ours first; conversion quality is a non-goal here, so
    /// channels are averaged/duplicated and resampling is linear.
    pub fn append(&mut self, other: &AudioSegment) {
        if other.channels == self.channels && other.sample_rate == self.sample_rate {
            self.samples.extend_from_slice(&other.samples);
        } else {
            let converted = other.remixed(self.channels).resampled(self.sample_rate);
            self.samples.extend_from_slice(&converted.samples);
        }
    }

    fn remixed(&self, channels: u16) -> AudioSegment {
        if channels == self.channels {
            return self.clone();
        }

        let src_ch = self.channels as usize;
        let dst_ch = channels as usize;
        let mut samples = Vec::with_capacity(self.frames() * dst_ch);
        for frame in self.samples.chunks_exact(src_ch) {
            // Downmix to a single value, then spread it across the target channels
            let mono = frame.iter().sum::<f32>() / src_ch as f32;
            if dst_ch == 1 {
                samples.push(mono);
            } else if src_ch == 1 {
                samples.extend(std::iter::repeat(frame[0]).take(dst_ch));
            } else {
                samples.extend(std::iter::repeat(mono).take(dst_ch));
            }
        }
        AudioSegment::new(samples, self.sample_rate, channels)
    }

    fn resampled(&self, sample_rate: u32) -> AudioSegment {
        if sample_rate == self.sample_rate {
            return self.clone();
        }

        let src_frames = self.frames();
        if src_frames == 0 {
            return AudioSegment::new(Vec::new(), sample_rate, self.channels);
        }

        let ch = self.channels as usize;
        let dst_frames =
            (src_frames as u64 * sample_rate as u64 / self.sample_rate as u64) as usize;
        let step = self.sample_rate as f64 / sample_rate as f64;

        let mut samples = Vec::with_capacity(dst_frames * ch);
        for i in 0..dst_frames {
            let pos = i as f64 * step;
            let lo = (pos as usize).min(src_frames - 1);
            let hi = (lo + 1).min(src_frames - 1);
            let frac = (pos - lo as f64) as f32;
            for c in 0..ch {
                let a = self.samples[lo * ch + c];
                let b = self.samples[hi * ch + c];
                samples.push(a + (b - a) * frac);
            }
        }
        AudioSegment::new(samples, sample_rate, self.channels)
    }
}
