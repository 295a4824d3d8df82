//! WAV container writer for mono 16-bit linear PCM.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use thiserror::Error;

/// Sample rate of the speech model's PCM output.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

const BYTES_PER_SAMPLE: usize = 2;

// ---------------------------------------------------------------------------
// AudioError
// ---------------------------------------------------------------------------

/// Errors from writing the audio container.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The PCM buffer does not hold a whole number of 16-bit samples.
    #[error("PCM buffer length {len} is not a multiple of 2 bytes")]
    UnalignedPcm { len: usize },

    /// The target file could not be created or written.
    #[error("failed to write audio file: {0}")]
    Io(#[from] std::io::Error),

    /// The WAV encoder rejected the stream (e.g. data too large for a header).
    #[error("WAV encoding failed: {0}")]
    Wav(String),
}

impl From<hound::Error> for AudioError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => AudioError::Io(io),
            other => AudioError::Wav(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// write_wav
// ---------------------------------------------------------------------------

/// Write `pcm` (little-endian `i16` samples, mono) to `path` as a WAV file.
///
/// The file is created or truncated.  An odd-length buffer is rejected before
/// the file system is touched.  The parent directory must already exist.
///
/// The writer owns the file handle, so it is closed on every return path; a
/// failure part-way through can leave a truncated file behind.
pub fn write_wav(path: impl AsRef<Path>, pcm: &[u8], sample_rate: u32) -> Result<(), AudioError> {
    if pcm.len() % BYTES_PER_SAMPLE != 0 {
        return Err(AudioError::UnalignedPcm { len: pcm.len() });
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path.as_ref(), spec)?;
    for pair in pcm.chunks_exact(BYTES_PER_SAMPLE) {
        writer.write_sample(i16::from_le_bytes([pair[0], pair[1]]))?;
    }
    writer.finalize()?;

    log::debug!(
        "wav: wrote {} samples @ {sample_rate} Hz to {}",
        pcm.len() / BYTES_PER_SAMPLE,
        path.as_ref().display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
