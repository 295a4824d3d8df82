//! Single-flight background execution of the pipeline.
//!
//! At most one job runs at a time.  A submission while a job is running is
//! rejected with [`JobError::Busy`]; nothing is queued.  Submitting outside a
//! Tokio runtime is rejected with [`JobError::NoRuntime`] and leaves the
//! state untouched.
//!
//! ```text
//! submit() ── no runtime? ──yes──▶ Err(NoRuntime)
//!    │ no
//!    ├─ state busy? ──yes──▶ Err(Busy)
//!    │ no
//!    ├─ state = Running, emit Started
//!    └─ tokio::spawn ─▶ tokio::spawn(pipeline.run)   (inner task: panics become JoinError)
//!                         │   on_stage → state = Running(stage), emit Stage
//!                         ▼
//!                  state = Succeeded | Failed, emit event
//!                         ▼
//!                  oneshot ─▶ JobHandle::wait()
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use super::output::ArtifactSet;
use super::runner::{DialoguePipeline, GenerationRequest, PipelineError};
use super::state::{lock_state, new_shared_state, JobState, PipelineStage, SharedJobState};

/// Why a submission was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    #[error("a generation job is already running")]
    Busy,

    #[error("no Tokio runtime is available to run the job")]
    NoRuntime,
}

/// Progress notifications for front ends.
#[derive(Debug, Clone, PartialEq)]
pub enum JobEvent {
    Started,
    Stage(PipelineStage),
    Succeeded(ArtifactSet),
    Failed(String),
}

// ---------------------------------------------------------------------------
// JobHandle
// ---------------------------------------------------------------------------

/// Completion handle for one accepted submission.
#[derive(Debug)]
pub struct JobHandle {
    rx: oneshot::Receiver<Result<ArtifactSet, PipelineError>>,
}

impl JobHandle {
    /// Wait for the job to finish.  Yields exactly one result.
    pub async fn wait(self) -> Result<ArtifactSet, PipelineError> {
        self.rx.await.unwrap_or_else(|_| {
            Err(PipelineError::Internal(
                "job ended without reporting a result".into(),
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// JobRunner
// ---------------------------------------------------------------------------

/// Owns the [`JobState`] and runs submissions in the background.
///
/// Cheap to clone; clones share the same state and event channel.
#[derive(Clone)]
pub struct JobRunner {
    pipeline: Arc<DialoguePipeline>,
    state: SharedJobState,
    events: Option<mpsc::UnboundedSender<JobEvent>>,
}

impl JobRunner {
    pub fn new(pipeline: DialoguePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            state: new_shared_state(),
            events: None,
        }
    }

    /// Send [`JobEvent`]s to `tx`.  A closed receiver is ignored.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<JobEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> JobState {
        lock_state(&self.state).clone()
    }

    /// Start `request` in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, request: GenerationRequest) -> Result<JobHandle, JobError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| JobError::NoRuntime)?;
        {
            let mut st = lock_state(&self.state);
            if st.is_busy() {
                log::warn!("job: rejected submission, {} in progress", st.label());
                return Err(JobError::Busy);
            }
            *st = JobState::Running(PipelineStage::ResolvingCredentials);
        }
        emit(&self.events, JobEvent::Started);

        let (tx, rx) = oneshot::channel();
        let pipeline = Arc::clone(&self.pipeline);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();

        let inner_runtime = runtime.clone();
        runtime.spawn(async move {
            let inner = {
                let state = Arc::clone(&state);
                let events = events.clone();
                inner_runtime.spawn(async move {
                    let on_stage = move |stage: PipelineStage| {
                        log::info!("job: {stage}");
                        *lock_state(&state) = JobState::Running(stage);
                        emit(&events, JobEvent::Stage(stage));
                    };
                    pipeline.run(&request, &on_stage).await
                })
            };

            let result = match inner.await {
                Ok(result) => result,
                Err(e) if e.is_panic() => {
                    Err(PipelineError::Internal("pipeline task panicked".into()))
                }
                Err(e) => Err(PipelineError::Internal(e.to_string())),
            };

            // Ready for the next submission before anyone is told.
            let event = match &result {
                Ok(artifacts) => {
                    *lock_state(&state) = JobState::Succeeded(artifacts.clone());
                    JobEvent::Succeeded(artifacts.clone())
                }
                Err(e) => {
                    log::error!("job failed: {e}");
                    *lock_state(&state) = JobState::Failed(e.to_string());
                    JobEvent::Failed(e.to_string())
                }
            };
            emit(&events, event);

            let _ = tx.send(result);
        });

        Ok(JobHandle { rx })
    }
}

fn emit(events: &Option<mpsc::UnboundedSender<JobEvent>>, event: JobEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
