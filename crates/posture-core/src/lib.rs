//! # Posture-Core
//!
//! Core types and utilities for the Posture Perfect repetition counter:
//! pose landmark frames as produced by a MediaPipe-style pose engine,
//! joint angle computation, and the shared error type.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
