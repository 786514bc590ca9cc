//! Per-exercise angle thresholds.
//!
//! All angles are in degrees. Defaults are the tuned values used by the
//! workout screens; every field can be overridden from
//! configuration.

use posture_core::{BodySide, JointTriple};
use serde::{Deserialize, Serialize};

/// Bicep curl: elbow angle (shoulder-elbow-wrist)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurlThresholds {
    pub side: BodySide,
    /// Arm extended when the elbow opens past this
    pub down_above: f64,
    /// Arm curled when the elbow closes under this
    pub up_below: f64,
}

impl Default for CurlThresholds {
    fn default() -> Self {
        Self {
            side: BodySide::Left,
            down_above: 160.0,
            up_below: 30.0,
        }
    }
}

impl CurlThresholds {
    pub fn elbow_joint(&self) -> JointTriple {
        JointTriple::new(self.side.shoulder(), self.side.elbow(), self.side.wrist())
    }
}

/// Push-up: elbow angle plus shoulder angle (hip-shoulder-elbow)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushUpThresholds {
    pub side: BodySide,
    /// Bottom of the push-up when the elbow is at or under this
    pub down_elbow_at_most: f64,
    /// Top of the push-up when the elbow opens past this
    pub up_elbow_above: f64,
    /// Arms held away from the torso, required at the top
    pub form_shoulder_above: f64,
}

impl Default for PushUpThresholds {
    fn default() -> Self {
        Self {
            side: BodySide::Left,
            down_elbow_at_most: 90.0,
            up_elbow_above: 160.0,
            form_shoulder_above: 40.0,
        }
    }
}

impl PushUpThresholds {
    pub fn elbow_joint(&self) -> JointTriple {
        JointTriple::new(self.side.shoulder(), self.side.elbow(), self.side.wrist())
    }

    pub fn shoulder_joint(&self) -> JointTriple {
        JointTriple::new(self.side.hip(), self.side.shoulder(), self.side.elbow())
    }
}

/// Squat: hip angle (shoulder-hip-knee) and knee angle (hip-knee-ankle)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquatThresholds {
    pub side: BodySide,
    /// Standing once the hip opens past this
    pub standing_hip_above: f64,
    /// Squatting once the knee closes under this
    pub squatting_knee_below: f64,
    /// Knee angle at or above this counts as good form
    pub form_knee_at_least: f64,
}

impl Default for SquatThresholds {
    fn default() -> Self {
        Self {
            side: BodySide::Left,
            standing_hip_above: 170.0,
            squatting_knee_below: 100.0,
            form_knee_at_least: 80.0,
        }
    }
}

impl SquatThresholds {
    pub fn hip_joint(&self) -> JointTriple {
        JointTriple::new(self.side.shoulder(), self.side.hip(), self.side.knee())
    }

    pub fn knee_joint(&self) -> JointTriple {
        JointTriple::new(self.side.hip(), self.side.knee(), self.side.ankle())
    }
}

/// Crunch: torso angle (knee-hip-shoulder) mapped onto a 0-100 percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrunchThresholds {
    pub side: BodySide,
    /// Torso angle lying flat (0%)
    pub flat_angle: f64,
    /// Torso angle fully crunched (100%)
    pub crunched_angle: f64,
    pub up_percent_at_least: u8,
    pub down_percent_at_most: u8,
}

impl Default for CrunchThresholds {
    fn default() -> Self {
        Self {
            side: BodySide::Right,
            flat_angle: 117.0,
            crunched_angle: 114.0,
            up_percent_at_least: 95,
            down_percent_at_most: 5,
        }
    }
}

impl CrunchThresholds {
    pub fn torso_joint(&self) -> JointTriple {
        JointTriple::new(self.side.knee(), self.side.hip(), self.side.shoulder())
    }
}

/// Threshold table for every supported exercise
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdTable {
    pub bicep_curl: CurlThresholds,
    pub push_up: PushUpThresholds,
    pub squat: SquatThresholds,
    pub crunch: CrunchThresholds,
}
