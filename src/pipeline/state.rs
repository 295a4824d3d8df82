//! Pipeline stages and the shared job state.
//!
//! [`PipelineStage`] names the step a run is in.  [`JobState`] is owned by the
//! [`JobRunner`](super::JobRunner) and read by front ends through
//! [`SharedJobState`], an `Arc<Mutex<JobState>>` that is cheap to clone.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::output::ArtifactSet;

// ---------------------------------------------------------------------------
// PipelineStage
// ---------------------------------------------------------------------------

/// Steps of one generation run, in order.
///
/// ```text
/// ResolvingCredentials ─▶ RequestingText ─▶ WritingTranscript
///   (raw text skips RequestingText)              │
///                                                ▼
///         Transcribing ◀─ WritingAudio ◀─ RequestingSpeech
///         (optional)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    ResolvingCredentials,
    RequestingText,
    WritingTranscript,
    RequestingSpeech,
    WritingAudio,
    Transcribing,
}

impl PipelineStage {
    /// Short label for progress output.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineStage::ResolvingCredentials => "Resolving credentials",
            PipelineStage::RequestingText => "Generating dialogue",
            PipelineStage::WritingTranscript => "Writing transcript",
            PipelineStage::RequestingSpeech => "Synthesizing speech",
            PipelineStage::WritingAudio => "Writing audio",
            PipelineStage::Transcribing => "Transcribing",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// JobState
// ---------------------------------------------------------------------------

/// Lifecycle of the (single) background job.
///
/// ```text
/// Idle ──submit──▶ Running(stage) ──ok──▶ Succeeded
///                                 ──err─▶ Failed
/// Succeeded / Failed ──submit──▶ Running
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JobState {
    #[default]
    Idle,
    Running(PipelineStage),
    Succeeded(ArtifactSet),
    Failed(String),
}

impl JobState {
    /// `true` while a job is running; new submissions are rejected.
    ///
    /// ```
    /// use dialogue_audio::pipeline::{JobState, PipelineStage};
    ///
    /// assert!(!JobState::Idle.is_busy());
    /// assert!(JobState::Running(PipelineStage::RequestingSpeech).is_busy());
    /// assert!(!JobState::Failed("boom".into()).is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, JobState::Running(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobState::Idle => "Idle",
            JobState::Running(stage) => stage.label(),
            JobState::Succeeded(_) => "Done",
            JobState::Failed(_) => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// SharedJobState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`JobState`].
///
/// Lock for a short critical section only; never hold it across `.await`.
pub type SharedJobState = Arc<Mutex<JobState>>;

pub fn new_shared_state() -> SharedJobState {
    Arc::new(Mutex::new(JobState::Idle))
}

/// Lock, recovering the state if a previous holder panicked.
pub(crate) fn lock_state(state: &SharedJobState) -> MutexGuard<'_, JobState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
