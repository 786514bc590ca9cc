//! Synthetic pose frames with exact joint angles.
//!
//! Builds landmark frames as a kinematic chain: two anchor points, then each
//! following landmark placed so the angle at the previous joint is exactly the
//! requested value. Used to replay scripted workouts without a pose engine.

use posture_core::{BodySide, Landmark, LandmarkFrame, PoseLandmark, Timestamp};

/// Builder for synthetic single-exercise frames
#[derive(Debug, Clone, Copy)]
pub struct SyntheticPose {
    timestamp: Timestamp,
    side: Option<BodySide>,
    segment: f64,
}

impl SyntheticPose {
    pub fn new() -> Self {
        Self {
            timestamp: Timestamp::default(),
            side: None,
            segment: 0.2,
        }
    }

    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Override the side the exercise would normally be tracked on
    pub fn on_side(mut self, side: BodySide) -> Self {
        self.side = Some(side);
        self
    }

    /// Shoulder, elbow, wrist with the given elbow angle
    pub fn bicep_curl(&self, elbow_angle: f64) -> LandmarkFrame {
        let side = self.side.unwrap_or(BodySide::Left);
        self.chain(
            [(0.5, 0.3), (0.5, 0.5)],
            &[elbow_angle],
            &[side.shoulder(), side.elbow(), side.wrist()],
        )
    }

    /// Hip, shoulder, elbow, wrist with the given elbow and shoulder angles
    pub fn push_up(&self, elbow_angle: f64, shoulder_angle: f64) -> LandmarkFrame {
        let side = self.side.unwrap_or(BodySide::Left);
        self.chain(
            [(0.8, 0.5), (0.5, 0.5)],
            &[shoulder_angle, elbow_angle],
            &[side.hip(), side.shoulder(), side.elbow(), side.wrist()],
        )
    }

    /// Shoulder, hip, knee, ankle with the given hip and knee angles
    pub fn squat(&self, hip_angle: f64, knee_angle: f64) -> LandmarkFrame {
        let side = self.side.unwrap_or(BodySide::Left);
        self.chain(
            [(0.5, 0.2), (0.5, 0.5)],
            &[hip_angle, knee_angle],
            &[side.shoulder(), side.hip(), side.knee(), side.ankle()],
        )
    }

    /// Knee, hip, shoulder with the given torso angle
    pub fn crunch(&self, torso_angle: f64) -> LandmarkFrame {
        let side = self.side.unwrap_or(BodySide::Right);
        self.chain(
            [(0.7, 0.6), (0.5, 0.7)],
            &[torso_angle],
            &[side.knee(), side.hip(), side.shoulder()],
        )
    }

    fn chain(
        &self,
        anchors: [(f64, f64); 2],
        angles: &[f64],
        ids: &[PoseLandmark],
    ) -> LandmarkFrame {
        debug_assert_eq!(ids.len(), angles.len() + 2);

        let mut points = anchors.to_vec();
        for &angle in angles {
            let n = points.len();
            let (px, py) = points[n - 2];
            let (vx, vy) = points[n - 1];
            let heading = (py - vy).atan2(px - vx) + angle.to_radians();
            points.push((
                vx + self.segment * heading.cos(),
                vy + self.segment * heading.sin(),
            ));
        }

        ids.iter()
            .zip(points)
            .fold(LandmarkFrame::empty(self.timestamp), |frame, (&id, (x, y))| {
                frame.with(id, Landmark::new(x, y))
            })
    }
}

impl Default for SyntheticPose {
    fn default() -> Self {
        Self::new()
    }
}
