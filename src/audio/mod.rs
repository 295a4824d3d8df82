//! Audio output: raw synthesis PCM → WAV container.
//!
//! The speech collaborator returns headerless little-endian 16-bit mono PCM.
//! [`write_wav`] wraps it into a playable file.
//!
//! ```rust,no_run
//! use dialogue_audio::audio::{write_wav, DEFAULT_SAMPLE_RATE};
//!
//! let pcm: Vec<u8> = vec![0; 48_000]; // 1 s of silence at 24 kHz
//! write_wav("out.wav", &pcm, DEFAULT_SAMPLE_RATE).unwrap();
//! ```

pub mod wav;

pub use wav::{write_wav, AudioError, DEFAULT_SAMPLE_RATE};
