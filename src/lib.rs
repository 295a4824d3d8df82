//! Two-speaker educational dialogue generator.
//!
//! Topic → Gemini text dialogue → Gemini multi-speaker TTS → WAV file →
//! optional Whisper transcript.
//!
//! | Module       | Responsibility                                            |
//! |--------------|-----------------------------------------------------------|
//! | [`dialogue`] | style hints, prompt composition, generated-text cleanup    |
//! | [`gemini`]   | remote collaborator traits, wire types, REST client        |
//! | [`audio`]    | raw PCM → WAV container                                    |
//! | [`transcribe`] | external Whisper subprocess                              |
//! | [`pipeline`] | orchestrator, job runner, artifact paths                   |
//! | [`config`]   | TOML settings, platform paths, API-key lookup              |

pub mod audio;
pub mod config;
pub mod dialogue;
pub mod gemini;
pub mod pipeline;
pub mod transcribe;
