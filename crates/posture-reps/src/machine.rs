//! Repetition state machines.
//!
//! Each exercise carries an explicit state object and a `step` transition that
//! consumes one classified reading. A held position never counts twice: a
//! counted transition must be followed by the opposite transition before the
//! next one can count.

use serde::{Deserialize, Serialize};

use crate::classifier::{CrunchReading, CurlReading, PushUpReading, Reading, SquatReading};
use crate::counter::RepCount;
use crate::exercise::{Exercise, Feedback, Phase};
use crate::progress::{ProgressStep, SetProgress, WorkoutTargets};

/// Counting event produced by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepEvent {
    /// First half of a two-phase rep
    HalfRep,
    /// A rep finished
    Rep,
    /// A rep finished a set; the per-set counter restarts
    SetComplete { set: u32 },
    /// A rep finished the final set
    WorkoutComplete,
}

impl From<ProgressStep> for RepEvent {
    fn from(step: ProgressStep) -> Self {
        match step {
            ProgressStep::Rep => RepEvent::Rep,
            ProgressStep::SetComplete { set } => RepEvent::SetComplete { set },
            ProgressStep::WorkoutComplete => RepEvent::WorkoutComplete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurlState {
    pub phase: Phase,
    pub rep_in_progress: bool,
    pub progress: SetProgress,
}

impl CurlState {
    pub fn new(targets: WorkoutTargets) -> Self {
        Self {
            phase: Phase::Down,
            rep_in_progress: false,
            progress: SetProgress::new(targets),
        }
    }

    pub fn step(&mut self, reading: &CurlReading) -> Option<RepEvent> {
        if reading.is_down && self.phase != Phase::Down {
            self.phase = Phase::Down;
            self.rep_in_progress = false;
        }

        if reading.is_up
            && self.phase == Phase::Down
            && !self.rep_in_progress
            && !self.progress.workout_complete
        {
            self.phase = Phase::Up;
            self.rep_in_progress = true;
            return Some(self.progress.record_rep().into());
        }

        None
    }

    pub fn reps(&self) -> RepCount {
        RepCount::from_whole(self.progress.total_reps)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PushUpState {
    /// Shown position; starts at the top (plank)
    pub stage: Phase,
    /// Last counted half; starts at the bottom so the first push counts
    pub phase: Phase,
    pub feedback: Feedback,
    pub reps: RepCount,
}

impl Default for PushUpState {
    fn default() -> Self {
        Self {
            stage: Phase::Up,
            phase: Phase::Down,
            feedback: Feedback::FixForm,
            reps: RepCount::ZERO,
        }
    }
}

impl PushUpState {
    pub fn step(&mut self, reading: &PushUpReading) -> Option<RepEvent> {
        if reading.is_up {
            self.stage = Phase::Up;
            self.feedback = Feedback::LowerDown;
            if self.phase == Phase::Down {
                self.phase = Phase::Up;
                return Some(self.add_half());
            }
        } else if reading.is_down {
            self.stage = Phase::Down;
            self.feedback = Feedback::PushUp;
            if self.phase == Phase::Up {
                self.phase = Phase::Down;
                return Some(self.add_half());
            }
        } else if !reading.proper_form {
            self.feedback = Feedback::KeepCoreTight;
        } else {
            self.feedback = match self.phase {
                Phase::Down => Feedback::PushUp,
                Phase::Up => Feedback::LowerDown,
            };
        }

        None
    }

    fn add_half(&mut self) -> RepEvent {
        self.reps.add_half();
        if self.reps.is_whole() {
            RepEvent::Rep
        } else {
            RepEvent::HalfRep
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquatState {
    pub phase: Phase,
    pub feedback: Feedback,
    pub reps: RepCount,
}

impl Default for SquatState {
    fn default() -> Self {
        Self {
            phase: Phase::Up,
            feedback: Feedback::FixForm,
            reps: RepCount::ZERO,
        }
    }
}

impl SquatState {
    pub fn step(&mut self, reading: &SquatReading) -> Option<RepEvent> {
        self.feedback = if reading.proper_form {
            Feedback::GoodForm
        } else {
            Feedback::SquatLower
        };

        let mut event = None;

        if reading.is_standing {
            if self.phase == Phase::Down {
                self.reps.add_whole();
                event = Some(RepEvent::Rep);
            }
            self.phase = Phase::Up;
        }

        if reading.is_squatting && self.phase == Phase::Up {
            self.phase = Phase::Down;
        }

        event
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrunchState {
    /// Direction of the last counted half (down = lying flat)
    pub phase: Phase,
    pub feedback: Feedback,
    pub reps: RepCount,
}

impl Default for CrunchState {
    fn default() -> Self {
        Self {
            phase: Phase::Down,
            feedback: Feedback::Start,
            reps: RepCount::ZERO,
        }
    }
}

impl CrunchState {
    pub fn step(&mut self, reading: &CrunchReading) -> Option<RepEvent> {
        if reading.is_up {
            self.feedback = Feedback::Up;
            if self.phase == Phase::Down {
                self.phase = Phase::Up;
                self.reps.add_half();
                return Some(RepEvent::HalfRep);
            }
        }

        if reading.is_down {
            self.feedback = Feedback::Down;
            if self.phase == Phase::Up {
                self.phase = Phase::Down;
                self.reps.add_half();
                return Some(RepEvent::Rep);
            }
        }

        None
    }
}

/// Counting state for whichever exercise a session tracks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "exercise", rename_all = "snake_case")]
pub enum RepState {
    BicepCurl(CurlState),
    PushUp(PushUpState),
    Squat(SquatState),
    Crunch(CrunchState),
}

impl RepState {
    pub fn new(exercise: Exercise, curl_targets: WorkoutTargets) -> Self {
        match exercise {
            Exercise::BicepCurl => RepState::BicepCurl(CurlState::new(curl_targets)),
            Exercise::PushUp => RepState::PushUp(PushUpState::default()),
            Exercise::Squat => RepState::Squat(SquatState::default()),
            Exercise::Crunch => RepState::Crunch(CrunchState::default()),
        }
    }

    pub fn exercise(&self) -> Exercise {
        match self {
            RepState::BicepCurl(_) => Exercise::BicepCurl,
            RepState::PushUp(_) => Exercise::PushUp,
            RepState::Squat(_) => Exercise::Squat,
            RepState::Crunch(_) => Exercise::Crunch,
        }
    }

    /// Apply one reading; a reading for another exercise changes nothing
    pub fn step(&mut self, reading: &Reading) -> Option<RepEvent> {
        match (self, reading) {
            (RepState::BicepCurl(s), Reading::BicepCurl(r)) => s.step(r),
            (RepState::PushUp(s), Reading::PushUp(r)) => s.step(r),
            (RepState::Squat(s), Reading::Squat(r)) => s.step(r),
            (RepState::Crunch(s), Reading::Crunch(r)) => s.step(r),
            (state, reading) => {
                tracing::warn!(
                    expected = %state.exercise(),
                    got = %reading.exercise(),
                    "Ignoring reading for a different exercise"
                );
                None
            }
        }
    }

    pub fn reps(&self) -> RepCount {
        match self {
            RepState::BicepCurl(s) => s.reps(),
            RepState::PushUp(s) => s.reps,
            RepState::Squat(s) => s.reps,
            RepState::Crunch(s) => s.reps,
        }
    }

    pub fn stage(&self) -> Phase {
        match self {
            RepState::BicepCurl(s) => s.phase,
            RepState::PushUp(s) => s.stage,
            RepState::Squat(s) => s.phase,
            RepState::Crunch(s) => s.phase,
        }
    }

    /// Current coaching cue; bicep curls have none
    pub fn feedback(&self) -> Option<Feedback> {
        match self {
            RepState::BicepCurl(_) => None,
            RepState::PushUp(s) => Some(s.feedback),
            RepState::Squat(s) => Some(s.feedback),
            RepState::Crunch(s) => Some(s.feedback),
        }
    }

    pub fn progress(&self) -> Option<&SetProgress> {
        match self {
            RepState::BicepCurl(s) => Some(&s.progress),
            _ => None,
        }
    }

    pub fn workout_complete(&self) -> bool {
        self.progress().map_or(false, |p| p.workout_complete)
    }
}
