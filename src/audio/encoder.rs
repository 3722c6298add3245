use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::debug;

use super::segment::AudioSegment;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("could not launch ffmpeg (is it installed and on PATH?): {0}")]
    Spawn(io::Error),
    #[error("could not stream samples to ffmpeg: {0}")]
    Pipe(io::Error),
    #[error("ffmpeg exited with {status}: {detail}")]
    Ffmpeg { status: ExitStatus, detail: String },
}

/// Encode a segment to `path` by piping raw PCM into an ffmpeg subprocess.
/// `format` and `bitrate` are passed straight through (e.g. "mp3", "320k").
pub fn encode(
    audio: &AudioSegment,
    path: &Path,
    format: &str,
    bitrate: &str,
) -> Result<(), EncodeError> {
    debug!(
        "encoding {} frames to {} as {} at {}",
        audio.frames(),
        path.display(),
        format,
        bitrate
    );

    let mut child = Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-y"])
        .args(["-f", "f32le"])
        .args(["-ar", &audio.sample_rate().to_string()])
        .args(["-ac", &audio.channels().to_string()])
        .args(["-i", "pipe:0"])
        .args(["-b:a", bitrate])
        .args(["-f", format])
        .arg(path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(EncodeError::Spawn)?;

    let write_result = write_samples(&mut child, audio);

    let output = child.wait_with_output().map_err(EncodeError::Pipe)?;
    if !output.status.success() {
        // A failed write usually means ffmpeg died first; its stderr is the real story
        return Err(EncodeError::Ffmpeg {
            status: output.status,
            detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    write_result?;

    Ok(())
}

fn write_samples(child: &mut Child, audio: &AudioSegment) -> Result<(), EncodeError> {
    let stdin = child
        .stdin
        .take()
        .ok_or_else(|| {
            EncodeError::Pipe(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "ffmpeg stdin was not captured",
            ))
        })?;

    let mut writer = BufWriter::new(stdin);
    for sample in audio.samples() {
        writer
            .write_all(&sample.to_le_bytes())
            .map_err(EncodeError::Pipe)?;
    }
    // Flush and drop to close the pipe so ffmpeg sees EOF
    writer.flush().map_err(EncodeError::Pipe)?;
    Ok(())
}
