//! Exercise catalogue, movement phases and form feedback.

use posture_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    BicepCurl,
    PushUp,
    Squat,
    Crunch,
}

impl Exercise {
    pub const ALL: [Exercise; 4] = [
        Exercise::BicepCurl,
        Exercise::PushUp,
        Exercise::Squat,
        Exercise::Crunch,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Exercise::BicepCurl => "Bicep Curl",
            Exercise::PushUp => "Push Up",
            Exercise::Squat => "Squat",
            Exercise::Crunch => "Crunch",
        }
    }

    /// Identifier used by the workout picker
    pub fn id(&self) -> &'static str {
        match self {
            Exercise::BicepCurl => "bicepCurls",
            Exercise::PushUp => "pushUps",
            Exercise::Squat => "squats",
            Exercise::Crunch => "crunches",
        }
    }

    /// Push-ups and crunches count one half per detected transition
    pub fn counts_half_reps(&self) -> bool {
        matches!(self, Exercise::PushUp | Exercise::Crunch)
    }

    /// Displayed stage when a session starts
    pub fn initial_stage(&self) -> Phase {
        match self {
            Exercise::BicepCurl | Exercise::Crunch => Phase::Down,
            Exercise::PushUp | Exercise::Squat => Phase::Up,
        }
    }
}

impl std::fmt::Display for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Exercise {
    type Err = Error;

    /// Accepts picker ids (`pushUps`), snake/kebab case and display names
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match key.as_str() {
            "bicepcurl" | "bicepcurls" | "curl" | "curls" => Ok(Exercise::BicepCurl),
            "pushup" | "pushups" => Ok(Exercise::PushUp),
            "squat" | "squats" => Ok(Exercise::Squat),
            "crunch" | "crunches" => Ok(Exercise::Crunch),
            _ => Err(Error::UnknownExercise(s.to_string())),
        }
    }
}

/// Coarse position within a repetition cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Down,
    Up,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Down => "down",
            Phase::Up => "up",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coaching cue shown next to the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    FixForm,
    LowerDown,
    PushUp,
    KeepCoreTight,
    GoodForm,
    SquatLower,
    Start,
    Up,
    Down,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::FixForm => "Fix Form",
            Feedback::LowerDown => "Lower Down",
            Feedback::PushUp => "Push Up",
            Feedback::KeepCoreTight => "Keep your core tight",
            Feedback::GoodForm => "Good Form",
            Feedback::SquatLower => "Squat Lower",
            Feedback::Start => "Start",
            Feedback::Up => "Up",
            Feedback::Down => "Down",
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
