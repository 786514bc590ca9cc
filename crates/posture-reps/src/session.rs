//! Single-exercise workout session.
//!
//! An [`ExerciseSession`] owns everything that changes frame to frame: the
//! counting state, the last reading, and frame statistics. Feed it frames in
//! capture order; frames with unusable landmarks are skipped without touching
//! the counting state.

use posture_core::{LandmarkFrame, Result, SessionId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::classifier::Reading;
use crate::config::RepCounterConfig;
use crate::counter::RepCount;
use crate::exercise::{Exercise, Feedback, Phase};
use crate::machine::{RepEvent, RepState};
use crate::progress::{SetProgress, WorkoutTargets};
use crate::thresholds::ThresholdTable;

/// Per-frame output consumed by an overlay renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutcome {
    pub session_id: SessionId,
    pub timestamp: Timestamp,
    pub exercise: Exercise,
    pub stage: Phase,
    pub reps: RepCount,
    /// Classification of this frame, or of the last usable one when skipped
    pub reading: Option<Reading>,
    pub feedback: Option<Feedback>,
    pub event: Option<RepEvent>,
    pub progress: Option<SetProgress>,
    /// True when the frame lacked a required landmark
    pub skipped: bool,
}

/// End-of-session report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub exercise: Exercise,
    /// Fractional count; half reps are kept if the session ends mid-cycle
    pub reps: RepCount,
    /// Completed reps (fractional count rounded down)
    pub completed_reps: u32,
    pub sets_completed: Option<u32>,
    pub workout_complete: bool,
    pub frames_processed: u64,
    pub frames_skipped: u64,
    pub started_at: Option<Timestamp>,
    pub last_frame_at: Option<Timestamp>,
}

pub struct ExerciseSession {
    id: SessionId,
    exercise: Exercise,
    thresholds: ThresholdTable,
    curl_targets: WorkoutTargets,
    min_visibility: f32,
    state: RepState,
    last_reading: Option<Reading>,
    frames_processed: u64,
    frames_skipped: u64,
    started_at: Option<Timestamp>,
    last_frame_at: Option<Timestamp>,
}

impl ExerciseSession {
    pub fn new(exercise: Exercise, config: &RepCounterConfig) -> Result<Self> {
        Self::with_id(SessionId::new(), exercise, config)
    }

    /// Fails if `config` does not pass [`RepCounterConfig::validate`]
    pub fn with_id(id: SessionId, exercise: Exercise, config: &RepCounterConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            id,
            exercise,
            thresholds: config.thresholds,
            curl_targets: config.curl_targets,
            min_visibility: config.min_visibility,
            state: RepState::new(exercise, config.curl_targets),
            last_reading: None,
            frames_processed: 0,
            frames_skipped: 0,
            started_at: None,
            last_frame_at: None,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    pub fn state(&self) -> &RepState {
        &self.state
    }

    pub fn reps(&self) -> RepCount {
        self.state.reps()
    }

    pub fn workout_complete(&self) -> bool {
        self.state.workout_complete()
    }

    /// Classify one frame and advance the counting state
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> FrameOutcome {
        let timestamp = frame.timestamp();
        if self.started_at.is_none() {
            self.started_at = Some(timestamp);
        }
        self.last_frame_at = Some(timestamp);
        self.frames_processed += 1;

        let reading = Reading::from_frame(
            self.exercise,
            &self.thresholds,
            frame,
            self.min_visibility,
        );

        let Some(reading) = reading else {
            self.frames_skipped += 1;
            tracing::debug!(
                session = %self.id,
                exercise = %self.exercise,
                "Skipping frame with missing landmarks"
            );
            return self.outcome(timestamp, None, true);
        };

        let stage_before = self.state.stage();
        let event = self.state.step(&reading);
        self.last_reading = Some(reading);

        let stage = self.state.stage();
        if stage != stage_before {
            tracing::debug!(session = %self.id, from = %stage_before, to = %stage, "Stage changed");
        }

        if let Some(event) = event {
            tracing::info!(
                session = %self.id,
                exercise = %self.exercise,
                reps = %self.state.reps(),
                ?event,
                "Rep counted"
            );
        }

        self.outcome(timestamp, event, false)
    }

    /// Current state as an outcome, without consuming a frame
    pub fn snapshot(&self) -> FrameOutcome {
        self.outcome(self.last_frame_at.unwrap_or_default(), None, false)
    }

    /// Discard all counting state, as when starting a new session
    pub fn reset(&mut self) {
        self.state = RepState::new(self.exercise, self.curl_targets);
        self.last_reading = None;
        self.frames_processed = 0;
        self.frames_skipped = 0;
        self.started_at = None;
        self.last_frame_at = None;
    }

    pub fn summary(&self) -> SessionSummary {
        let reps = self.state.reps();
        SessionSummary {
            session_id: self.id,
            exercise: self.exercise,
            reps,
            completed_reps: reps.whole(),
            sets_completed: self.state.progress().map(|p| p.sets_completed),
            workout_complete: self.state.workout_complete(),
            frames_processed: self.frames_processed,
            frames_skipped: self.frames_skipped,
            started_at: self.started_at,
            last_frame_at: self.last_frame_at,
        }
    }

    fn outcome(&self, timestamp: Timestamp, event: Option<RepEvent>, skipped: bool) -> FrameOutcome {
        FrameOutcome {
            session_id: self.id,
            timestamp,
            exercise: self.exercise,
            stage: self.state.stage(),
            reps: self.state.reps(),
            reading: self.last_reading,
            feedback: self.state.feedback(),
            event,
            progress: self.state.progress().copied(),
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticPose;
    use posture_core::PoseLandmark;

    fn session(exercise: Exercise, targets: WorkoutTargets) -> ExerciseSession {
        let config = RepCounterConfig {
            curl_targets: targets,
            ..Default::default()
        };
        ExerciseSession::new(exercise, &config).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = RepCounterConfig::default();
        config.thresholds.bicep_curl.up_below = 170.0;

        let result = ExerciseSession::new(Exercise::BicepCurl, &config);
        assert!(matches!(result, Err(posture_core::Error::Config(_))));
    }

    #[test]
    fn test_bicep_curl_scenario() {
        let mut s = session(Exercise::BicepCurl, WorkoutTargets::new(1, 1));
        let pose = SyntheticPose::new();

        let reps: Vec<u32> = [170.0, 165.0, 20.0, 25.0, 170.0]
            .iter()
            .map(|&a| s.process_frame(&pose.bicep_curl(a)).reps.whole())
            .collect();

        assert_eq!(reps, vec![0, 0, 1, 1, 1]);
        assert!(s.workout_complete());

        let after = s.process_frame(&pose.bicep_curl(20.0));
        assert_eq!(after.reps.whole(), 1);
        assert_eq!(after.event, None);
    }

    #[test]
    fn test_push_up_scenario() {
        let mut s = session(Exercise::PushUp, WorkoutTargets::default());
        let pose = SyntheticPose::new();

        let up = s.process_frame(&pose.push_up(170.0, 50.0));
        assert_eq!(up.reps.as_f64(), 0.5);
        assert_eq!(up.feedback, Some(Feedback::LowerDown));
        assert_eq!(up.event, Some(RepEvent::HalfRep));

        let down = s.process_frame(&pose.push_up(80.0, 50.0));
        assert_eq!(down.reps.as_f64(), 1.0);
        assert_eq!(down.feedback, Some(Feedback::PushUp));
        assert_eq!(down.event, Some(RepEvent::Rep));
    }

    #[test]
    fn test_squat_scenario() {
        let mut s = session(Exercise::Squat, WorkoutTargets::default());
        let pose = SyntheticPose::new();

        let counts: Vec<u32> = [(175.0, 175.0), (175.0, 175.0), (110.0, 90.0), (175.0, 175.0), (175.0, 175.0)]
            .iter()
            .map(|&(hip, knee)| s.process_frame(&pose.squat(hip, knee)).reps.whole())
            .collect();

        assert_eq!(counts, vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_crunch_scenario() {
        let mut s = session(Exercise::Crunch, WorkoutTargets::default());
        let pose = SyntheticPose::new();

        let outcomes: Vec<FrameOutcome> = [117.0, 114.0, 117.0]
            .iter()
            .map(|&a| s.process_frame(&pose.crunch(a)))
            .collect();

        let counts: Vec<f64> = outcomes.iter().map(|o| o.reps.as_f64()).collect();
        let stages: Vec<Phase> = outcomes.iter().map(|o| o.stage).collect();
        assert_eq!(counts, vec![0.0, 0.5, 1.0]);
        assert_eq!(stages, vec![Phase::Down, Phase::Up, Phase::Down]);
    }

    #[test]
    fn test_missing_wrist_leaves_state_unchanged() {
        let mut s = session(Exercise::BicepCurl, WorkoutTargets::new(5, 1));
        let pose = SyntheticPose::new();

        s.process_frame(&pose.bicep_curl(170.0));
        let up = s.process_frame(&pose.bicep_curl(20.0));
        let state_before = *s.state();

        let mut frame = pose.bicep_curl(170.0);
        frame.set(PoseLandmark::LeftWrist, None);
        let skipped = s.process_frame(&frame);

        assert!(skipped.skipped);
        assert_eq!(skipped.reps, up.reps);
        assert_eq!(skipped.stage, up.stage);
        assert_eq!(*s.state(), state_before);

        // The skipped extension must not have re-armed the curl
        let next = s.process_frame(&pose.bicep_curl(20.0));
        assert_eq!(next.reps.whole(), 1);

        let summary = s.summary();
        assert_eq!(summary.frames_processed, 4);
        assert_eq!(summary.frames_skipped, 1);
    }

    #[test]
    fn test_counter_never_decreases() {
        let mut s = session(Exercise::PushUp, WorkoutTargets::default());
        let pose = SyntheticPose::new();
        let script = [
            (170.0, 50.0),
            (120.0, 50.0),
            (80.0, 50.0),
            (80.0, 20.0),
            (170.0, 20.0),
            (170.0, 60.0),
            (60.0, 60.0),
            (175.0, 45.0),
        ];

        let mut last = RepCount::ZERO;
        for (elbow, shoulder) in script {
            let outcome = s.process_frame(&pose.push_up(elbow, shoulder));
            assert!(outcome.reps >= last);
            last = outcome.reps;
        }
        assert_eq!(last.as_f64(), 2.5);
    }

    #[test]
    fn test_summary_reports_fractional_and_whole() {
        let mut s = session(Exercise::Crunch, WorkoutTargets::default());
        let pose = SyntheticPose::new();
        for angle in [117.0, 114.0, 117.0, 114.0] {
            s.process_frame(&pose.crunch(angle));
        }

        let summary = s.summary();
        assert_eq!(summary.reps.as_f64(), 1.5);
        assert_eq!(summary.completed_reps, 1);
        assert_eq!(summary.sets_completed, None);
        assert!(!summary.workout_complete);
    }

    #[test]
    fn test_reset() {
        let mut s = session(Exercise::Squat, WorkoutTargets::default());
        let pose = SyntheticPose::new();
        s.process_frame(&pose.squat(110.0, 90.0));
        s.process_frame(&pose.squat(175.0, 175.0));
        assert_eq!(s.reps().whole(), 1);

        s.reset();
        let snapshot = s.snapshot();
        assert_eq!(snapshot.reps, RepCount::ZERO);
        assert_eq!(snapshot.stage, Phase::Up);
        assert!(snapshot.reading.is_none());
        assert_eq!(s.summary().frames_processed, 0);
    }

    #[test]
    fn test_curl_outcome_carries_progress() {
        let mut s = session(Exercise::BicepCurl, WorkoutTargets::new(1, 2));
        let pose = SyntheticPose::new();

        let first = s.process_frame(&pose.bicep_curl(20.0));
        assert_eq!(first.event, Some(RepEvent::SetComplete { set: 1 }));
        let progress = first.progress.unwrap();
        assert_eq!(progress.sets_completed, 1);
        assert_eq!(progress.reps_in_set, 0);
        assert_eq!(first.feedback, None);
    }
}
