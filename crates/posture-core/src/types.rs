//! Fundamental types for the Posture Perfect rep counter.

use chrono::{DateTime, Utc};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Unique identifier for a workout session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Pose engines report frame times in milliseconds (`performance.now()`)
    pub fn from_millis_f64(millis: f64) -> Self {
        Self((millis * 1_000_000.0) as i64)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

/// MediaPipe Pose landmark indices (33 total)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl PoseLandmark {
    pub const COUNT: usize = 33;

    const ALL: [PoseLandmark; PoseLandmark::COUNT] = [
        Self::Nose,
        Self::LeftEyeInner,
        Self::LeftEye,
        Self::LeftEyeOuter,
        Self::RightEyeInner,
        Self::RightEye,
        Self::RightEyeOuter,
        Self::LeftEar,
        Self::RightEar,
        Self::MouthLeft,
        Self::MouthRight,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftPinky,
        Self::RightPinky,
        Self::LeftIndex,
        Self::RightIndex,
        Self::LeftThumb,
        Self::RightThumb,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftFootIndex,
        Self::RightFootIndex,
    ];

    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Which side of the body an exercise is tracked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodySide {
    #[default]
    Left,
    Right,
}

impl BodySide {
    pub fn shoulder(self) -> PoseLandmark {
        match self {
            BodySide::Left => PoseLandmark::LeftShoulder,
            BodySide::Right => PoseLandmark::RightShoulder,
        }
    }

    pub fn elbow(self) -> PoseLandmark {
        match self {
            BodySide::Left => PoseLandmark::LeftElbow,
            BodySide::Right => PoseLandmark::RightElbow,
        }
    }

    pub fn wrist(self) -> PoseLandmark {
        match self {
            BodySide::Left => PoseLandmark::LeftWrist,
            BodySide::Right => PoseLandmark::RightWrist,
        }
    }

    pub fn hip(self) -> PoseLandmark {
        match self {
            BodySide::Left => PoseLandmark::LeftHip,
            BodySide::Right => PoseLandmark::RightHip,
        }
    }

    pub fn knee(self) -> PoseLandmark {
        match self {
            BodySide::Left => PoseLandmark::LeftKnee,
            BodySide::Right => PoseLandmark::RightKnee,
        }
    }

    pub fn ankle(self) -> PoseLandmark {
        match self {
            BodySide::Left => PoseLandmark::LeftAnkle,
            BodySide::Right => PoseLandmark::RightAnkle,
        }
    }
}

/// A single landmark in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// 0-1 normalized, left to right
    pub x: f64,
    /// 0-1 normalized, top to bottom
    pub y: f64,
    /// Relative depth (hip midpoint origin)
    #[serde(default)]
    pub z: f64,
    /// Likelihood the point is visible, when the engine reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f32>,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: None,
        }
    }

    pub fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn to_point2(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Landmarks without a visibility score are always trusted
    pub fn is_visible(&self, min_visibility: f32) -> bool {
        self.visibility.map_or(true, |v| v >= min_visibility)
    }
}

/// All landmarks detected for one video frame
///
/// Always holds exactly [`PoseLandmark::COUNT`] slots; a `None` slot means the
/// engine did not report that landmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameRepr", into = "FrameRepr")]
pub struct LandmarkFrame {
    timestamp: Timestamp,
    landmarks: Vec<Option<Landmark>>,
}

#[derive(Clone, Serialize, Deserialize)]
struct FrameRepr {
    #[serde(default)]
    timestamp: Timestamp,
    landmarks: Vec<Option<Landmark>>,
}

impl TryFrom<FrameRepr> for LandmarkFrame {
    type Error = Error;

    fn try_from(repr: FrameRepr) -> Result<Self> {
        Self::from_slots(repr.timestamp, repr.landmarks)
    }
}

impl From<LandmarkFrame> for FrameRepr {
    fn from(frame: LandmarkFrame) -> Self {
        Self {
            timestamp: frame.timestamp,
            landmarks: frame.landmarks,
        }
    }
}

impl LandmarkFrame {
    /// Values per landmark in a flat buffer (x, y, z)
    pub const FLAT_STRIDE: usize = 3;

    /// Frame with no landmarks detected
    pub fn empty(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            landmarks: vec![None; PoseLandmark::COUNT],
        }
    }

    /// Build from a full landmark list in MediaPipe order
    pub fn from_landmarks(timestamp: Timestamp, landmarks: &[Landmark]) -> Result<Self> {
        Self::from_slots(timestamp, landmarks.iter().copied().map(Some).collect())
    }

    /// Build from per-slot optional landmarks in MediaPipe order
    pub fn from_slots(timestamp: Timestamp, landmarks: Vec<Option<Landmark>>) -> Result<Self> {
        if landmarks.len() != PoseLandmark::COUNT {
            return Err(Error::InvalidFrame {
                expected: PoseLandmark::COUNT,
                actual: landmarks.len(),
            });
        }
        Ok(Self {
            timestamp,
            landmarks,
        })
    }

    /// Build from a flat buffer of 99 values (33 landmarks × x, y, z)
    pub fn from_flat(timestamp: Timestamp, data: &[f32]) -> Result<Self> {
        let expected = PoseLandmark::COUNT * Self::FLAT_STRIDE;
        if data.len() != expected {
            return Err(Error::InvalidFrame {
                expected,
                actual: data.len(),
            });
        }

        let landmarks = data
            .chunks_exact(Self::FLAT_STRIDE)
            .map(|c| {
                Some(Landmark {
                    x: c[0] as f64,
                    y: c[1] as f64,
                    z: c[2] as f64,
                    visibility: None,
                })
            })
            .collect();

        Ok(Self {
            timestamp,
            landmarks,
        })
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn get(&self, landmark: PoseLandmark) -> Option<&Landmark> {
        self.landmarks.get(landmark.index())?.as_ref()
    }

    pub fn set(&mut self, landmark: PoseLandmark, value: Option<Landmark>) {
        self.landmarks[landmark.index()] = value;
    }

    /// Builder-style `set`
    pub fn with(mut self, landmark: PoseLandmark, value: Landmark) -> Self {
        self.set(landmark, Some(value));
        self
    }

    pub fn detected_count(&self) -> usize {
        self.landmarks.iter().flatten().count()
    }
}
