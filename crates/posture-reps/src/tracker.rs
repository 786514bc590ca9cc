//! Concurrent registry of live workout sessions.

use posture_core::{Error, LandmarkFrame, Result, SessionId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::config::RepCounterConfig;
use crate::exercise::Exercise;
use crate::session::{ExerciseSession, FrameOutcome, SessionSummary};

type SharedSession = Arc<Mutex<ExerciseSession>>;

/// Tracks many sessions
///
/// The map lock is only held long enough to find a session. Each session has
/// its own mutex, so one session never sees two frames at once while frames
/// for different sessions proceed independently.
pub struct SessionTracker {
    config: RepCounterConfig,
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
}

impl SessionTracker {
    pub fn new(config: RepCounterConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &RepCounterConfig {
        &self.config
    }

    /// Start a new session for an exercise
    pub async fn start_session(&self, exercise: Exercise) -> Result<SessionId> {
        let session = ExerciseSession::new(exercise, &self.config)?;
        let id = session.id();

        tracing::info!(session = %id, %exercise, "Session started");
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        Ok(id)
    }

    async fn get(&self, id: SessionId) -> Result<SharedSession> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::UnknownSession(id.to_string()))
    }

    /// Apply one frame to a session
    pub async fn process_frame(&self, id: SessionId, frame: &LandmarkFrame) -> Result<FrameOutcome> {
        let session = self.get(id).await?;
        let mut session = session.lock().await;
        Ok(session.process_frame(frame))
    }

    /// Current state of a session without consuming a frame
    pub async fn snapshot(&self, id: SessionId) -> Option<FrameOutcome> {
        let session = self.get(id).await.ok()?;
        let snapshot = session.lock().await.snapshot();
        Some(snapshot)
    }

    pub async fn summary(&self, id: SessionId) -> Option<SessionSummary> {
        let session = self.get(id).await.ok()?;
        let summary = session.lock().await.summary();
        Some(summary)
    }

    /// Zero a session's counters, e.g. when starting a new set manually
    pub async fn reset_session(&self, id: SessionId) -> Result<()> {
        let session = self.get(id).await?;
        session.lock().await.reset();
        Ok(())
    }

    /// Remove a session and return its final report
    pub async fn end_session(&self, id: SessionId) -> Result<SessionSummary> {
        let session = self
            .sessions
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| Error::UnknownSession(id.to_string()))?;

        // Waits for a frame still being applied
        let summary = session.lock().await.summary();
        tracing::info!(
            session = %id,
            exercise = %summary.exercise,
            reps = %summary.reps,
            "Session ended"
        );
        Ok(summary)
    }

    /// Get all active sessions
    pub async fn active_sessions(&self) -> Vec<SessionId> {
        let sessions = self.sessions.read().await;
        sessions.keys().copied().collect()
    }

    /// End every session
    pub async fn end_all(&self) -> Vec<SessionSummary> {
        let drained: Vec<SharedSession> = {
            let mut sessions = self.sessions.write().await;
            sessions.drain().map(|(_, s)| s).collect()
        };

        let mut summaries = Vec::with_capacity(drained.len());
        for session in drained {
            summaries.push(session.lock().await.summary());
        }
        summaries
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self {
            config: RepCounterConfig::default(),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}
