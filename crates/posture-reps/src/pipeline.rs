//! Streaming rep counting.
//!
//! Connects a [`LandmarkSource`] to an [`ExerciseSession`] running on its own
//! task. Outcomes stream out over a bounded channel in frame order and the
//! session summary is returned when the task ends.

use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use posture_core::{Error, Result};

use crate::config::RepCounterConfig;
use crate::exercise::Exercise;
use crate::session::{ExerciseSession, FrameOutcome, SessionSummary};
use crate::source::LandmarkSource;

/// Live streaming pipeline for one exercise
pub struct FramePipeline {
    config: RepCounterConfig,
    exercise: Exercise,
    is_running: Arc<watch::Sender<bool>>,
}

/// Handle to a running stream
pub struct PipelineHandle {
    /// Per-frame outcomes, in frame order
    pub outcomes: mpsc::Receiver<FrameOutcome>,
    task: JoinHandle<SessionSummary>,
}

impl FramePipeline {
    pub fn new(exercise: Exercise, config: RepCounterConfig) -> Self {
        let (is_running, _) = watch::channel(false);
        Self {
            config,
            exercise,
            is_running: Arc::new(is_running),
        }
    }

    /// Start the source and spawn the counting task
    pub async fn start_streaming<S: LandmarkSource + 'static>(
        &mut self,
        mut source: S,
    ) -> Result<PipelineHandle> {
        self.config.validate()?;

        let (tx, rx) = mpsc::channel(self.config.output_queue_size);

        source.start().await?;

        self.is_running.send_replace(true);
        let is_running = self.is_running.clone();
        let mut run_flag = is_running.subscribe();

        let mut session = ExerciseSession::new(self.exercise, &self.config)?;
        tracing::info!(session = %session.id(), exercise = %self.exercise, "Streaming started");

        let task = tokio::spawn(async move {
            loop {
                if !*run_flag.borrow_and_update() {
                    break;
                }

                // A quiet live source must not hold off a stop request
                let next = tokio::select! {
                    next = source.recv() => next,
                    _ = run_flag.changed() => continue,
                };

                match next {
                    Ok(Some(frame)) => {
                        let outcome = session.process_frame(&frame);
                        if tx.send(outcome).await.is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Ok(None) => {
                        tracing::debug!(session = %session.id(), "Landmark source exhausted");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("Landmark source error: {}", e);
                        break;
                    }
                }
            }

            if let Err(e) = source.stop().await {
                tracing::warn!("Failed to stop landmark source: {}", e);
            }
            is_running.send_replace(false);

            let summary = session.summary();
            tracing::info!(
                session = %summary.session_id,
                reps = %summary.reps,
                frames = summary.frames_processed,
                "Streaming finished"
            );
            summary
        });

        Ok(PipelineHandle { outcomes: rx, task })
    }

    /// Stop the pipeline, interrupting a pending wait for the next frame
    pub async fn stop(&mut self) {
        self.is_running.send_replace(false);
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.borrow()
    }

    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    /// Get current configuration
    pub fn config(&self) -> &RepCounterConfig {
        &self.config
    }
}

impl PipelineHandle {
    /// Stop consuming outcomes and wait for the final summary
    pub async fn finish(self) -> Result<SessionSummary> {
        drop(self.outcomes);
        self.task
            .await
            .map_err(|e| Error::Pipeline(format!("Counting task failed: {}", e)))
    }

    /// Drain every outcome until the stream ends, then return the summary
    pub async fn collect(mut self) -> Result<(Vec<FrameOutcome>, SessionSummary)> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.outcomes.recv().await {
            outcomes.push(outcome);
        }

        let summary = self
            .task
            .await
            .map_err(|e| Error::Pipeline(format!("Counting task failed: {}", e)))?;
        Ok((outcomes, summary))
    }
}
