//! Set and workout progress for target-driven exercises.

use serde::{Deserialize, Serialize};

/// Reps per set and number of sets for a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkoutTargets {
    pub reps_per_set: u32,
    pub sets: u32,
}

impl Default for WorkoutTargets {
    fn default() -> Self {
        Self {
            reps_per_set: 4,
            sets: 1,
        }
    }
}

impl WorkoutTargets {
    pub fn new(reps_per_set: u32, sets: u32) -> Self {
        Self { reps_per_set, sets }
    }

    /// A zero target leaves nothing to do
    pub fn is_trivial(&self) -> bool {
        self.reps_per_set == 0 || self.sets == 0
    }

    pub fn total_reps(&self) -> u32 {
        self.reps_per_set.saturating_mul(self.sets)
    }
}

/// What a counted rep did to the workout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStep {
    /// Rep counted inside the current set
    Rep,
    /// Rep finished a set; a new set starts at zero
    SetComplete { set: u32 },
    /// Rep finished the final set
    WorkoutComplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetProgress {
    pub targets: WorkoutTargets,
    /// Reps in the set currently being performed
    pub reps_in_set: u32,
    pub sets_completed: u32,
    pub total_reps: u32,
    pub workout_complete: bool,
}

impl SetProgress {
    pub fn new(targets: WorkoutTargets) -> Self {
        Self {
            targets,
            reps_in_set: 0,
            sets_completed: 0,
            total_reps: 0,
            workout_complete: targets.is_trivial(),
        }
    }

    /// Record one rep; callers must not record once the workout is complete
    pub fn record_rep(&mut self) -> ProgressStep {
        debug_assert!(!self.workout_complete, "rep recorded after workout completion");

        self.total_reps = self.total_reps.saturating_add(1);
        self.reps_in_set = self.reps_in_set.saturating_add(1);

        if self.reps_in_set < self.targets.reps_per_set {
            return ProgressStep::Rep;
        }

        self.sets_completed = self.sets_completed.saturating_add(1);
        if self.sets_completed >= self.targets.sets {
            self.workout_complete = true;
            tracing::info!(
                sets = self.sets_completed,
                total_reps = self.total_reps,
                "Workout complete"
            );
            return ProgressStep::WorkoutComplete;
        }

        tracing::info!(set = self.sets_completed, "Set complete, starting next set");
        self.reps_in_set = 0;
        ProgressStep::SetComplete {
            set: self.sets_completed,
        }
    }

    /// 1-based number of the set in progress, capped at the target
    pub fn current_set(&self) -> u32 {
        self.sets_completed.saturating_add(1).min(self.targets.sets.max(1))
    }

    /// Completion score in percent (completed sets / target sets)
    pub fn score(&self) -> u32 {
        if self.targets.sets == 0 {
            return 100;
        }
        (self.sets_completed as f64 / self.targets.sets as f64 * 100.0).round() as u32
    }
}
