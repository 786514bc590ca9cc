//! # Posture-Reps
//!
//! Repetition counting for four bodyweight exercises over a stream of pose
//! landmark frames.
//!
//! ## Counting Model
//!
//! Each frame is reduced to joint angles on one body side, the angles are
//! classified against per-exercise thresholds, and an explicit state object
//! advances on the classification:
//!
//! - **Bicep curl**: whole reps, grouped into sets with a workout target
//! - **Push-up**: a half rep per direction change, gated on shoulder form
//! - **Squat**: one rep on returning to standing after a deep squat
//! - **Crunch**: a half rep per direction change of the torso percentage
//!
//! Frames missing a required landmark are skipped and leave the count intact.
//!
//! ## Runtime
//!
//! [`ExerciseSession`] is the synchronous core. [`SessionTracker`] multiplexes
//! sessions behind an async lock, and [`FramePipeline`] drives a session from
//! any [`LandmarkSource`].

pub mod classifier;
pub mod config;
pub mod counter;
pub mod exercise;
pub mod machine;
pub mod pipeline;
pub mod progress;
pub mod session;
pub mod source;
pub mod synthetic;
pub mod thresholds;
pub mod tracker;

pub use crate::config::RepCounterConfig;
pub use classifier::*;
pub use counter::*;
pub use exercise::*;
pub use machine::*;
pub use pipeline::*;
pub use progress::*;
pub use session::*;
pub use source::*;
pub use synthetic::*;
pub use thresholds::*;
pub use tracker::*;
