//! Async driver for the derivation pipeline.
//!
//! The orchestrator task is the single writer of pipeline state. Submissions
//! arrive as commands, stage calls run as independent tasks that report back
//! over a channel, and every transition is published as a snapshot on a watch
//! channel for projections to read.

use super::machine::Pipeline;
use super::state::{
    Generation, PipelineSnapshot, StageCompletion, StageOutcome, StageRequest,
};
use crate::backend::{Backend, RemoteResult};
use crate::config::PipelineSettings;
use crate::error::{Result, ZetaError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

/// Capacity of the command channel.
const COMMAND_CHANNEL_CAPACITY: usize = 32;

enum Command {
    Submit {
        reference: String,
        reply: oneshot::Sender<Result<Generation>>,
    },
    Shutdown,
}

/// Owner of the pipeline state while the orchestrator task runs.
pub struct Orchestrator {
    backend: Arc<dyn Backend>,
    pipeline: Pipeline,
    stage_timeout: Option<Duration>,
    snapshots: watch::Sender<PipelineSnapshot>,
    completions: mpsc::UnboundedSender<StageCompletion>,
}

impl Orchestrator {
    /// Start the orchestrator task and return a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(backend: Arc<dyn Backend>, settings: &PipelineSettings) -> OrchestratorHandle {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(PipelineSnapshot::default());

        let orchestrator = Self {
            backend,
            pipeline: Pipeline::new(),
            stage_timeout: settings.stage_timeout_secs.map(Duration::from_secs),
            snapshots: snapshots_tx,
            completions: completions_tx,
        };

        tokio::spawn(orchestrator.run(commands_rx, completions_rx));

        OrchestratorHandle {
            commands: commands_tx,
            snapshots: snapshots_rx,
        }
    }

    /// Drive a single chain to the point where nothing is left in flight.
    ///
    /// Stages run one after another on the calling task; `on_update` sees every
    /// intermediate snapshot. Used when there is nothing to resubmit.
    pub async fn run_to_completion<F>(
        backend: &dyn Backend,
        settings: &PipelineSettings,
        reference: &str,
        mut on_update: F,
    ) -> Result<PipelineSnapshot>
    where
        F: FnMut(&PipelineSnapshot),
    {
        let stage_timeout = settings.stage_timeout_secs.map(Duration::from_secs);
        let mut pipeline = Pipeline::new();
        let mut next = Some(pipeline.submit(reference)?);
        on_update(&pipeline.snapshot());

        while let Some(request) = next {
            let completion = execute(backend, request, stage_timeout).await;
            next = pipeline.apply(completion);
            on_update(&pipeline.snapshot());
        }

        Ok(pipeline.snapshot())
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut completions: mpsc::UnboundedReceiver<StageCompletion>,
    ) {
        info!("Pipeline orchestrator started");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Submit { reference, reply }) => {
                        let result = self.submit(&reference);
                        // The caller may have stopped waiting; the chain runs regardless.
                        let _ = reply.send(result);
                    }
                    Some(Command::Shutdown) | None => break,
                },
                Some(completion) = completions.recv() => self.complete(completion),
            }
        }

        info!("Pipeline orchestrator stopped");
    }

    fn submit(&mut self, reference: &str) -> Result<Generation> {
        let request = self.pipeline.submit(reference)?;
        let generation = request.generation();
        self.dispatch(request);
        self.publish();
        Ok(generation)
    }

    fn complete(&mut self, completion: StageCompletion) {
        if let Some(request) = self.pipeline.apply(completion) {
            self.dispatch(request);
        }
        self.publish();
    }

    fn dispatch(&self, request: StageRequest) {
        debug!("Dispatching {} for chain {}", request.stage(), request.generation());

        let backend = Arc::clone(&self.backend);
        let completions = self.completions.clone();
        let stage_timeout = self.stage_timeout;

        tokio::spawn(async move {
            let completion = execute(backend.as_ref(), request, stage_timeout).await;
            // Receiver gone means the orchestrator stopped; nothing left to update.
            let _ = completions.send(completion);
        });
    }

    fn publish(&self) {
        let snapshot = self.pipeline.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

/// Perform the remote call for one stage request.
pub async fn execute(
    backend: &dyn Backend,
    request: StageRequest,
    stage_timeout: Option<Duration>,
) -> StageCompletion {
    let generation = request.generation();

    let outcome = match request {
        StageRequest::SubmitVideo { reference, .. } => StageOutcome::Video(
            bounded(stage_timeout, backend.submit_video(&reference)).await,
        ),
        StageRequest::DeriveChapters { transcript, .. } => StageOutcome::Chapters(
            bounded(stage_timeout, backend.derive_chapters(&transcript)).await,
        ),
        StageRequest::DeriveFlashcards { chapters, .. } => StageOutcome::Flashcards(
            bounded(stage_timeout, backend.derive_flashcards(&chapters)).await,
        ),
    };

    StageCompletion {
        generation,
        outcome,
    }
}

async fn bounded<T, F>(stage_timeout: Option<Duration>, call: F) -> Result<T>
where
    F: Future<Output = RemoteResult<T>>,
{
    match stage_timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result.map_err(ZetaError::from),
            Err(_) => Err(ZetaError::StageTimeout(limit.as_secs())),
        },
        None => call.await.map_err(ZetaError::from),
    }
}

/// Cloneable handle to a running orchestrator.
#[derive(Clone)]
pub struct OrchestratorHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<PipelineSnapshot>,
}

impl OrchestratorHandle {
    /// Submit a video reference, restarting the chain.
    ///
    /// Returns the generation assigned to the new chain, or a validation error
    /// if the reference is not a recognized video URL.
    pub async fn submit(&self, reference: &str) -> Result<Generation> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Submit {
                reference: reference.to_string(),
                reply,
            })
            .await
            .map_err(|_| ZetaError::OrchestratorClosed)?;

        response.await.map_err(|_| ZetaError::OrchestratorClosed)?
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> PipelineSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every published transition.
    pub fn subscribe(&self) -> watch::Receiver<PipelineSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until `generation` has nothing in flight, or a newer chain replaced it.
    pub async fn settled(&self, generation: Generation) -> Result<PipelineSnapshot> {
        let mut snapshots = self.snapshots.clone();
        let snapshot = snapshots
            .wait_for(|s| {
                s.generation > generation || (s.generation == generation && s.is_settled())
            })
            .await
            .map_err(|_| ZetaError::OrchestratorClosed)?;
        Ok(snapshot.clone())
    }

    /// Stop the orchestrator task. In-flight stage calls finish but are ignored.
    pub async fn shutdown(&self) {
        // Already stopped if the send fails.
        let _ = self.commands.send(Command::Shutdown).await;
    }
}
