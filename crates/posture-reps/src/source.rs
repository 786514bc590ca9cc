//! Landmark frame sources.
//!
//! A pose engine runs outside this crate; these adapters are how its output
//! reaches a [`crate::pipeline::FramePipeline`]:
//!
//! - [`ReplaySource`] plays back recorded frames, optionally paced
//! - [`ChannelSource`] receives frames pushed by a live engine over mpsc

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

use posture_core::{Error, LandmarkFrame, Result};

/// Trait for landmark frame producers
#[async_trait]
pub trait LandmarkSource: Send + Sync {
    /// Start producing frames
    async fn start(&mut self) -> Result<()>;

    /// Stop producing frames
    async fn stop(&mut self) -> Result<()>;

    /// Check if the source is active
    fn is_running(&self) -> bool;

    /// Receive the next frame; `Ok(None)` once the stream has ended
    async fn recv(&mut self) -> Result<Option<LandmarkFrame>>;

    /// Take a frame if one is ready (non-blocking)
    fn try_recv(&mut self) -> Option<LandmarkFrame>;
}

/// Replays a recorded sequence of frames
#[derive(Debug)]
pub struct ReplaySource {
    frames: VecDeque<LandmarkFrame>,
    interval: Option<Duration>,
    is_running: bool,
}

impl ReplaySource {
    pub fn from_frames(frames: impl IntoIterator<Item = LandmarkFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            interval: None,
            is_running: false,
        }
    }

    /// Parse a JSON array of frames
    pub fn from_json(json: &str) -> Result<Self> {
        let frames: Vec<LandmarkFrame> = serde_json::from_str(json)?;
        Ok(Self::from_frames(frames))
    }

    /// Load a JSON recording from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Source(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::from_json(&json)
    }

    /// Wait this long before yielding each frame, to mimic a live camera
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Frames not yet replayed
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

#[async_trait]
impl LandmarkSource for ReplaySource {
    async fn start(&mut self) -> Result<()> {
        self.is_running = true;
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.is_running = false;
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.is_running
    }

    async fn recv(&mut self) -> Result<Option<LandmarkFrame>> {
        if !self.is_running {
            return Err(Error::Source("Replay not started".into()));
        }

        if self.frames.is_empty() {
            return Ok(None);
        }

        if let Some(interval) = self.interval {
            tokio::time::sleep(interval).await;
        }

        Ok(self.frames.pop_front())
    }

    fn try_recv(&mut self) -> Option<LandmarkFrame> {
        if !self.is_running {
            return None;
        }
        self.frames.pop_front()
    }
}

/// Receives frames from a live producer
#[derive(Debug)]
pub struct ChannelSource {
    rx: mpsc::Receiver<LandmarkFrame>,
    is_running: bool,
}

impl ChannelSource {
    /// Create a source and the sender a pose engine pushes frames into
    pub fn new(capacity: usize) -> (mpsc::Sender<LandmarkFrame>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            tx,
            Self {
                rx,
                is_running: false,
            },
        )
    }
}

#[async_trait]
impl LandmarkSource for ChannelSource {
    async fn start(&mut self) -> Result<()> {
        self.is_running = true;
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.is_running = false;
        self.rx.close();
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.is_running
    }

    async fn recv(&mut self) -> Result<Option<LandmarkFrame>> {
        if !self.is_running {
            return Err(Error::Source("Channel source not started".into()));
        }

        // All senders dropped ends the stream
        Ok(self.rx.recv().await)
    }

    fn try_recv(&mut self) -> Option<LandmarkFrame> {
        if !self.is_running {
            return None;
        }
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticPose;
    use posture_core::Timestamp;

    fn recording() -> Vec<LandmarkFrame> {
        [170.0, 90.0, 20.0]
            .iter()
            .enumerate()
            .map(|(i, &angle)| {
                SyntheticPose::new()
                    .at(Timestamp::from_millis_f64(i as f64 * 33.0))
                    .bicep_curl(angle)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_replay_in_order() {
        let frames = recording();
        let mut source = ReplaySource::from_frames(frames.clone());

        assert!(source.recv().await.is_err());

        source.start().await.unwrap();
        assert!(source.is_running());
        for expected in &frames {
            assert_eq!(source.recv().await.unwrap().as_ref(), Some(expected));
        }
        assert!(source.recv().await.unwrap().is_none());
        assert_eq!(source.remaining(), 0);
    }

    #[tokio::test]
    async fn test_replay_from_json() {
        let json = serde_json::to_string(&recording()).unwrap();
        let mut source = ReplaySource::from_json(&json).unwrap();
        assert_eq!(source.remaining(), 3);

        source.start().await.unwrap();
        assert!(source.try_recv().is_some());
        assert_eq!(source.remaining(), 2);

        let err = ReplaySource::from_json(r#"[{"landmarks": []}]"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[tokio::test]
    async fn test_replay_from_file() {
        let path = std::env::temp_dir().join(format!("posture-replay-{}.json", std::process::id()));
        std::fs::write(&path, serde_json::to_string(&recording()).unwrap()).unwrap();

        let source = ReplaySource::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(source.remaining(), 3);

        let missing = ReplaySource::from_file(path.with_extension("missing"));
        assert!(matches!(missing, Err(Error::Source(_))));
    }

    #[tokio::test]
    async fn test_replay_pacing() {
        let mut source =
            ReplaySource::from_frames(recording()).with_interval(Duration::from_millis(5));
        source.start().await.unwrap();

        let started = std::time::Instant::now();
        while source.recv().await.unwrap().is_some() {}
        assert!(started.elapsed() >= Duration::from_millis(15));
    }

    #[tokio::test]
    async fn test_channel_source() {
        let (tx, mut source) = ChannelSource::new(4);
        assert!(source.recv().await.is_err());
        source.start().await.unwrap();

        let frame = SyntheticPose::new().squat(175.0, 175.0);
        tx.send(frame.clone()).await.unwrap();
        assert_eq!(source.try_recv(), Some(frame.clone()));
        assert!(source.try_recv().is_none());

        tx.send(frame.clone()).await.unwrap();
        drop(tx);
        assert_eq!(source.recv().await.unwrap(), Some(frame));
        assert!(source.recv().await.unwrap().is_none());

        source.stop().await.unwrap();
        assert!(!source.is_running());
    }
}
