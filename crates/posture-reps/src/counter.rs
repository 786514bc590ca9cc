//! Repetition count stored in exact half-rep units.

use posture_core::Error;
use serde::{Deserialize, Serialize};

/// Non-negative repetition count with half-rep resolution
///
/// Serializes as a plain number (`3.5`). A session that ends mid-cycle keeps
/// its fractional value; [`RepCount::whole`] gives the completed reps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RepCount {
    halves: u32,
}

impl RepCount {
    pub const ZERO: RepCount = RepCount { halves: 0 };

    pub fn from_whole(reps: u32) -> Self {
        Self {
            halves: reps.saturating_mul(2),
        }
    }

    pub fn from_halves(halves: u32) -> Self {
        Self { halves }
    }

    pub fn add_half(&mut self) {
        self.halves = self.halves.saturating_add(1);
    }

    pub fn add_whole(&mut self) {
        self.halves = self.halves.saturating_add(2);
    }

    pub fn halves(&self) -> u32 {
        self.halves
    }

    /// Completed repetitions (rounded down)
    pub fn whole(&self) -> u32 {
        self.halves / 2
    }

    pub fn is_whole(&self) -> bool {
        self.halves % 2 == 0
    }

    pub fn as_f64(&self) -> f64 {
        self.halves as f64 / 2.0
    }
}

impl From<RepCount> for f64 {
    fn from(count: RepCount) -> Self {
        count.as_f64()
    }
}

impl TryFrom<f64> for RepCount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let halves = value * 2.0;
        if !halves.is_finite() || halves < 0.0 || halves.fract() != 0.0 || halves > u32::MAX as f64
        {
            return Err(Error::InvalidInput(format!(
                "rep count must be a non-negative multiple of 0.5, got {value}"
            )));
        }
        Ok(Self {
            halves: halves as u32,
        })
    }
}

impl std::fmt::Display for RepCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.whole())
        } else {
            write!(f, "{}.5", self.whole())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_steps() {
        let mut count = RepCount::ZERO;
        count.add_half();
        assert_eq!(count.as_f64(), 0.5);
        assert_eq!(count.whole(), 0);
        assert!(!count.is_whole());

        count.add_half();
        assert_eq!(count.as_f64(), 1.0);
        assert_eq!(count.whole(), 1);

        count.add_whole();
        count.add_half();
        assert_eq!(count.as_f64(), 2.5);
        assert_eq!(count.whole(), 2);
        assert_eq!(count.to_string(), "2.5");
        assert_eq!(RepCount::from_whole(4).to_string(), "4");
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let mut count = RepCount::from_whole(u32::MAX);
        assert_eq!(count.halves(), u32::MAX);

        count.add_whole();
        count.add_half();
        assert_eq!(count.halves(), u32::MAX);
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&RepCount::from_halves(7)).unwrap();
        assert_eq!(json, "3.5");

        let back: RepCount = serde_json::from_str("3.5").unwrap();
        assert_eq!(back.halves(), 7);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(RepCount::try_from(-1.0).is_err());
        assert!(RepCount::try_from(1.25).is_err());
        assert!(RepCount::try_from(f64::NAN).is_err());
        assert!(serde_json::from_str::<RepCount>("0.3").is_err());
    }
}
