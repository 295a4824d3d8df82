//! Pipeline orchestrator and job runner.
//!
//! This module wires the topic → dialogue → transcript → speech → WAV →
//! (transcription) pipeline and the single-flight runner that front ends
//! submit to.
//!
//! # Architecture
//!
//! ```text
//! front end (CLI)
//!        │ submit(GenerationRequest)
//!        ▼
//! JobRunner ── busy? ──▶ Err(JobError::Busy)
//!        │
//!        ▼  tokio task
//! DialoguePipeline::run()
//!        ├─ CredentialProvider::resolve
//!        ├─ TextGenerator        (skipped for raw text)
//!        ├─ transcript file
//!        ├─ SpeechSynthesizer
//!        ├─ spawn_blocking(write_wav)
//!        └─ spawn_blocking(Transcriber)   (optional)
//!
//! SharedJobState (Arc<Mutex<JobState>>) ←── read via JobRunner::state()
//! JobEvent (mpsc)                       ──▶ front end progress output
//! JobHandle::wait()                     ──▶ Result<ArtifactSet, PipelineError>
//! ```

pub mod job;
pub mod output;
pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use job::{JobError, JobEvent, JobHandle, JobRunner};
pub use output::{default_base_name, resolve_output_base, sanitize_base_name, ArtifactSet};
pub use runner::{DialoguePipeline, GenerationRequest, PipelineError, StageCallback};
pub use state::{new_shared_state, JobState, PipelineStage, SharedJobState};
