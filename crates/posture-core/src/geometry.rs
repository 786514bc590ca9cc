//! Joint angle computation over pose landmarks.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::types::{LandmarkFrame, PoseLandmark};

/// Minimum ray length (normalized units) for an angle to be meaningful
pub const MIN_RAY_LENGTH: f64 = 1e-9;

/// Interior angle at `b` in degrees, in [0, 180]
///
/// θ = |atan2(c − b) − atan2(a − b)|, reflected to 360 − θ when above 180,
/// so the result does not depend on limb orientation or camera mirroring.
pub fn calculate_angle(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    let ba: Vector2<f64> = a - b;
    let bc: Vector2<f64> = c - b;

    let radians = bc.y.atan2(bc.x) - ba.y.atan2(ba.x);
    let mut degrees = radians.to_degrees().abs();

    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }

    debug_assert!((0.0..=180.0).contains(&degrees), "angle {degrees} out of range");
    degrees
}

/// Three landmarks forming an angle, with the joint in the middle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JointTriple {
    pub first: PoseLandmark,
    pub vertex: PoseLandmark,
    pub last: PoseLandmark,
}

impl JointTriple {
    pub const fn new(first: PoseLandmark, vertex: PoseLandmark, last: PoseLandmark) -> Self {
        Self {
            first,
            vertex,
            last,
        }
    }

    pub fn landmarks(&self) -> [PoseLandmark; 3] {
        [self.first, self.vertex, self.last]
    }
}

/// Angle at `joint.vertex` on this frame, if all three landmarks are usable
///
/// Returns `None` when a landmark is absent, below `min_visibility`, not
/// finite, or coincides with the vertex.
pub fn joint_angle(frame: &LandmarkFrame, joint: &JointTriple, min_visibility: f32) -> Option<f64> {
    let mut points = [Point2::origin(); 3];
    for (slot, id) in points.iter_mut().zip(joint.landmarks()) {
        let lm = frame.get(id)?;
        if !lm.is_finite() || !lm.is_visible(min_visibility) {
            return None;
        }
        *slot = lm.to_point2();
    }

    let [a, b, c] = points;
    if (a - b).norm() < MIN_RAY_LENGTH || (c - b).norm() < MIN_RAY_LENGTH {
        return None;
    }

    Some(calculate_angle(&a, &b, &c))
}

/// Linearly map `value` from the `from` range onto the `to` range (unclamped)
pub fn map_range(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let span = from.1 - from.0;
    if span.abs() < f64::EPSILON {
        return to.0;
    }
    to.0 + (value - from.0) / span * (to.1 - to.0)
}
