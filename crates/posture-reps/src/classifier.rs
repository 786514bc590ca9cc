//! Position classifiers mapping joint angles to position predicates.
//!
//! Each classifier is a pure function of the current angles. Reading the
//! angles off a frame fails softly: if any required landmark is unusable the
//! frame yields no reading at all.

use posture_core::{joint_angle, map_range, JointTriple, LandmarkFrame};
use serde::{Deserialize, Serialize};

use crate::exercise::Exercise;
use crate::thresholds::{
    CrunchThresholds, CurlThresholds, PushUpThresholds, SquatThresholds, ThresholdTable,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurlReading {
    pub elbow_angle: f64,
    pub is_down: bool,
    pub is_up: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PushUpReading {
    pub elbow_angle: f64,
    pub shoulder_angle: f64,
    pub is_down: bool,
    pub is_up: bool,
    pub proper_form: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquatReading {
    pub hip_angle: f64,
    pub knee_angle: f64,
    pub is_standing: bool,
    pub is_squatting: bool,
    pub proper_form: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrunchReading {
    pub torso_angle: f64,
    /// 0 lying flat, 100 fully crunched
    pub percentage: u8,
    pub is_down: bool,
    pub is_up: bool,
}

impl CurlThresholds {
    pub fn classify(&self, elbow_angle: f64) -> CurlReading {
        CurlReading {
            elbow_angle,
            is_down: elbow_angle > self.down_above,
            is_up: elbow_angle < self.up_below,
        }
    }
}

impl PushUpThresholds {
    pub fn classify(&self, elbow_angle: f64, shoulder_angle: f64) -> PushUpReading {
        let proper_form = shoulder_angle > self.form_shoulder_above;
        PushUpReading {
            elbow_angle,
            shoulder_angle,
            is_down: elbow_angle <= self.down_elbow_at_most,
            is_up: elbow_angle > self.up_elbow_above && proper_form,
            proper_form,
        }
    }
}

impl SquatThresholds {
    pub fn classify(&self, hip_angle: f64, knee_angle: f64) -> SquatReading {
        SquatReading {
            hip_angle,
            knee_angle,
            is_standing: hip_angle > self.standing_hip_above,
            is_squatting: knee_angle < self.squatting_knee_below,
            proper_form: knee_angle >= self.form_knee_at_least,
        }
    }
}

impl CrunchThresholds {
    /// Torso angle as a rounded percentage of the flat → crunched range
    pub fn percentage(&self, torso_angle: f64) -> u8 {
        let raw = map_range(
            torso_angle,
            (self.flat_angle, self.crunched_angle),
            (0.0, 100.0),
        );
        raw.round().clamp(0.0, 100.0) as u8
    }

    pub fn classify(&self, torso_angle: f64) -> CrunchReading {
        let percentage = self.percentage(torso_angle);
        CrunchReading {
            torso_angle,
            percentage,
            is_down: percentage <= self.down_percent_at_most,
            is_up: percentage >= self.up_percent_at_least,
        }
    }
}

/// One frame's classification for any exercise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "exercise", rename_all = "snake_case")]
pub enum Reading {
    BicepCurl(CurlReading),
    PushUp(PushUpReading),
    Squat(SquatReading),
    Crunch(CrunchReading),
}

impl Reading {
    /// Classify a frame, or `None` if a required landmark is missing
    pub fn from_frame(
        exercise: Exercise,
        table: &ThresholdTable,
        frame: &LandmarkFrame,
        min_visibility: f32,
    ) -> Option<Self> {
        let angle = |joint: JointTriple| joint_angle(frame, &joint, min_visibility);

        match exercise {
            Exercise::BicepCurl => {
                let t = &table.bicep_curl;
                let elbow = angle(t.elbow_joint())?;
                Some(Reading::BicepCurl(t.classify(elbow)))
            }
            Exercise::PushUp => {
                let t = &table.push_up;
                let elbow = angle(t.elbow_joint())?;
                let shoulder = angle(t.shoulder_joint())?;
                Some(Reading::PushUp(t.classify(elbow, shoulder)))
            }
            Exercise::Squat => {
                let t = &table.squat;
                let hip = angle(t.hip_joint())?;
                let knee = angle(t.knee_joint())?;
                Some(Reading::Squat(t.classify(hip, knee)))
            }
            Exercise::Crunch => {
                let t = &table.crunch;
                let torso = angle(t.torso_joint())?;
                Some(Reading::Crunch(t.classify(torso)))
            }
        }
    }

    pub fn exercise(&self) -> Exercise {
        match self {
            Reading::BicepCurl(_) => Exercise::BicepCurl,
            Reading::PushUp(_) => Exercise::PushUp,
            Reading::Squat(_) => Exercise::Squat,
            Reading::Crunch(_) => Exercise::Crunch,
        }
    }

    /// The angle drawn next to the tracked joint
    pub fn primary_angle(&self) -> f64 {
        match self {
            Reading::BicepCurl(r) => r.elbow_angle,
            Reading::PushUp(r) => r.elbow_angle,
            Reading::Squat(r) => r.knee_angle,
            Reading::Crunch(r) => r.torso_angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::SyntheticPose;

    #[test]
    fn test_curl_predicates() {
        let t = CurlThresholds::default();
        assert!(t.classify(170.0).is_down);
        assert!(!t.classify(160.0).is_down);
        assert!(t.classify(20.0).is_up);
        assert!(!t.classify(30.0).is_up);

        let mid = t.classify(90.0);
        assert!(!mid.is_down && !mid.is_up);
    }

    #[test]
    fn test_push_up_needs_form_at_top() {
        let t = PushUpThresholds::default();

        let top = t.classify(170.0, 50.0);
        assert!(top.is_up && top.proper_form);

        let sagging = t.classify(170.0, 20.0);
        assert!(!sagging.is_up);
        assert!(!sagging.proper_form);

        assert!(t.classify(90.0, 50.0).is_down);
        assert!(!t.classify(91.0, 50.0).is_down);
    }

    #[test]
    fn test_squat_predicates() {
        let t = SquatThresholds::default();

        let standing = t.classify(175.0, 175.0);
        assert!(standing.is_standing && !standing.is_squatting);

        let deep = t.classify(80.0, 70.0);
        assert!(deep.is_squatting);
        assert!(!deep.proper_form);

        let parallel = t.classify(95.0, 90.0);
        assert!(parallel.is_squatting && parallel.proper_form);
    }

    #[test]
    fn test_crunch_percentage() {
        let t = CrunchThresholds::default();
        assert_eq!(t.percentage(117.0), 0);
        assert_eq!(t.percentage(114.0), 100);
        assert_eq!(t.percentage(115.5), 50);
        assert_eq!(t.percentage(130.0), 0);
        assert_eq!(t.percentage(90.0), 100);

        assert!(t.classify(117.0).is_down);
        assert!(t.classify(114.0).is_up);
        let mid = t.classify(115.5);
        assert!(!mid.is_down && !mid.is_up);
    }

    #[test]
    fn test_reading_from_synthetic_frames() {
        let table = ThresholdTable::default();

        let frame = SyntheticPose::new().bicep_curl(25.0);
        match Reading::from_frame(Exercise::BicepCurl, &table, &frame, 0.5) {
            Some(Reading::BicepCurl(r)) => {
                assert!((r.elbow_angle - 25.0).abs() < 1e-6);
                assert!(r.is_up);
            }
            other => panic!("unexpected reading {other:?}"),
        }

        let frame = SyntheticPose::new().push_up(170.0, 50.0);
        match Reading::from_frame(Exercise::PushUp, &table, &frame, 0.5) {
            Some(Reading::PushUp(r)) => {
                assert!((r.elbow_angle - 170.0).abs() < 1e-6);
                assert!((r.shoulder_angle - 50.0).abs() < 1e-6);
            }
            other => panic!("unexpected reading {other:?}"),
        }

        let frame = SyntheticPose::new().squat(175.0, 90.0);
        match Reading::from_frame(Exercise::Squat, &table, &frame, 0.5) {
            Some(Reading::Squat(r)) => {
                assert!((r.hip_angle - 175.0).abs() < 1e-6);
                assert!((r.knee_angle - 90.0).abs() < 1e-6);
            }
            other => panic!("unexpected reading {other:?}"),
        }

        let frame = SyntheticPose::new().crunch(114.0);
        match Reading::from_frame(Exercise::Crunch, &table, &frame, 0.5) {
            Some(Reading::Crunch(r)) => assert_eq!(r.percentage, 100),
            other => panic!("unexpected reading {other:?}"),
        }
    }

    #[test]
    fn test_wrong_side_landmarks_yield_no_reading() {
        let table = ThresholdTable::default();
        // Crunch tracks the right side; a left-side curl frame has none of it
        let frame = SyntheticPose::new().bicep_curl(90.0);
        assert!(Reading::from_frame(Exercise::Crunch, &table, &frame, 0.5).is_none());
    }
}
