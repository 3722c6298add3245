// The combine pass - decode each track in order, weld them with silence gaps,
// encode the result. Runs after the interactive session, in cooked mode.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use super::decoder;
use super::encoder::{self, EncodeError};
use super::segment::AudioSegment;
use crate::config::OutputConfig;

#[derive(Debug, Error)]
pub enum CombineError {
    #[error("none of the input files could be decoded")]
    NoValidInput,
    #[error("could not write the combined file: {0}")]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Clone)]
pub struct CombineSummary {
    pub files_combined: usize,
    pub files_skipped: usize,
    pub duration: Duration,
}

pub struct Combiner {
    silence_gap: Duration,
    format: String,
    bitrate: String,
}

impl Combiner {
    pub fn new(silence_gap: Duration, output: &OutputConfig) -> Self {
        Self {
            silence_gap,
            format: output.format.clone(),
            bitrate: output.bitrate.clone(),
        }
    }

    /// Combine `files` (paths relative to `input_dir`, already in final order)
    /// into `output`. Tracks that fail to decode are skipped with a warning and
    /// contribute nothing, not even a gap.
    pub fn combine(
        &self,
        files: &[String],
        input_dir: &Path,
        output: &Path,
    ) -> Result<CombineSummary, CombineError> {
        let (mix, files_combined, files_skipped) = self.assemble(files, input_dir)?;

        println!("\nSaving combined audio to {}...", output.display());
        encoder::encode(&mix, output, &self.format, &self.bitrate)?;

        let summary = CombineSummary {
            files_combined,
            files_skipped,
            duration: mix.duration(),
        };
        info!(
            "combined {} file(s) ({} skipped) into {}, {:.2}s total",
            summary.files_combined,
            summary.files_skipped,
            output.display(),
            summary.duration.as_secs_f64()
        );

        Ok(summary)
    }

    /// Decode-and-weld stage. Silence goes only between two tracks that both
    /// decoded, so a skipped file never leaves an orphan gap behind.
    fn assemble(
        &self,
        files: &[String],
        input_dir: &Path,
    ) -> Result<(AudioSegment, usize, usize), CombineError> {
        let mut mix: Option<AudioSegment> = None;
        let mut files_combined = 0;
        let mut files_skipped = 0;

        for name in files {
            let path = input_dir.join(name);
            println!("Processing: {name}");

            match decoder::decode(&path) {
                Ok(audio) => {
                    match mix.take() {
                        Some(mut current) => {
                            let gap = AudioSegment::silence(
                                self.silence_gap,
                                current.sample_rate(),
                                current.channels(),
                            );
                            current.append(&gap);
                            current.append(&audio);
                            println!(
                                "Added {:.1}s of silence before {name}",
                                self.silence_gap.as_secs_f64()
                            );
                            mix = Some(current);
                        }
                        None => mix = Some(audio),
                    }
                    files_combined += 1;
                }
                Err(e) => {
                    warn!("skipping {}: {e}", path.display());
                    println!("Warning: could not process '{name}', skipping ({e})");
                    files_skipped += 1;
                }
            }
        }

        let mix = mix.ok_or(CombineError::NoValidInput)?;
        Ok((mix, files_combined, files_skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    // Minimal 16-bit PCM WAV writer so fixtures decode through the real pipeline
    fn write_wav(path: &Path, frames: usize, sample_rate: u32, channels: u16) {
        let data_len = frames * channels as usize * 2;
        let mut buf = Vec::with_capacity(44 + data_len);
        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&((36 + data_len) as u32).to_le_bytes());
        buf.extend_from_slice(b"WAVE");
        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
        buf.extend_from_slice(&channels.to_le_bytes());
        buf.extend_from_slice(&sample_rate.to_le_bytes());
        buf.extend_from_slice(&(sample_rate * channels as u32 * 2).to_le_bytes());
        buf.extend_from_slice(&(channels * 2).to_le_bytes());
        buf.extend_from_slice(&16u16.to_le_bytes());
        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        buf.resize(44 + data_len, 0);
        fs::write(path, buf).unwrap();
    }

    fn test_combiner(gap_ms: u64) -> Combiner {
        let config = Config::default();
        Combiner::new(Duration::from_millis(gap_ms), &config.output)
    }

    #[test]
    fn test_gap_goes_only_between_decoded_neighbors() {
        let dir = tempdir().unwrap();
        write_wav(&dir.path().join("one.wav"), 8000, 8000, 1);
        fs::write(dir.path().join("two.wav"), b"this is not audio").unwrap();
        write_wav(&dir.path().join("three.wav"), 8000, 8000, 1);

        let files: Vec<String> = ["one.wav", "two.wav", "three.wav"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (mix, combined, skipped) = test_combiner(500)
            .assemble(&files, dir.path())
            .unwrap();

        assert_eq!(combined, 2);
        assert_eq!(skipped, 1);
        // Two one-second tracks plus exactly one 0.5s gap - not two
        let total_ms = mix.duration().as_millis();
        assert!((2495..=2505).contains(&total_ms), "got {total_ms}ms");
    }

    #[test]
    fn test_gap_count_for_clean_run() {
        let dir = tempdir().unwrap();
        for name in ["a.wav", "b.wav", "c.wav"] {
            write_wav(&dir.path().join(name), 4000, 8000, 1);
        }

        let files: Vec<String> = ["a.wav", "b.wav", "c.wav"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let (mix, combined, skipped) = test_combiner(1000)
            .assemble(&files, dir.path())
            .unwrap();

        assert_eq!(combined, 3);
        assert_eq!(skipped, 0);
        // Three half-second tracks, two gaps: 3.5s total
        let total_ms = mix.duration().as_millis();
        assert!((3495..=3505).contains(&total_ms), "got {total_ms}ms");
    }

    #[test]
    fn test_all_failures_is_no_valid_input() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("one.wav"), b"garbage").unwrap();
        fs::write(dir.path().join("two.wav"), b"more garbage").unwrap();

        let files: Vec<String> = ["one.wav", "two.wav"].iter().map(|s| s.to_string()).collect();

        let err = test_combiner(1000)
            .assemble(&files, dir.path())
            .unwrap_err();
        assert!(matches!(err, CombineError::NoValidInput));
    }

    #[test]
    fn test_missing_file_is_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        write_wav(&dir.path().join("real.wav"), 4000, 8000, 1);

        let files: Vec<String> = ["ghost.wav", "real.wav"].iter().map(|s| s.to_string()).collect();

        let (_, combined, skipped) = test_combiner(1000)
            .assemble(&files, dir.path())
            .unwrap();
        assert_eq!(combined, 1);
        assert_eq!(skipped, 1);
    }
}
