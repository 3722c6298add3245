use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;
use tracing::debug;

use super::segment::AudioSegment;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("could not open file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported or corrupt audio: {0}")]
    Codec(#[from] SymphoniaError),
    #[error("no decodable audio track")]
    NoTrack,
    #[error("stream is missing sample rate or channel layout")]
    MissingSpec,
}

/// Decode an entire file into one in-memory segment.
pub fn decode(path: &Path) -> Result<AudioSegment, DecodeError> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;

    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoTrack)?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::MissingSpec)?;
    let channels = track
        .codec_params
        .channels
        .ok_or(DecodeError::MissingSpec)?
        .count() as u16;

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples = Vec::new();
    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(_) => break, // EOF
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(_) => continue, // skip undecodable packets, keep the rest
        };

        let mut buf = SampleBuffer::<f32>::new(decoded.frames() as u64, *decoded.spec());
        buf.copy_interleaved_ref(decoded);
        samples.extend_from_slice(buf.samples());
    }

    debug!(
        "decoded {}: {} samples at {} Hz, {} channel(s)",
        path.display(),
        samples.len(),
        sample_rate,
        channels
    );

    Ok(AudioSegment::new(samples, sample_rate, channels))
}
