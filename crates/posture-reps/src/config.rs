//! Rep counter configuration.

use posture_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::progress::WorkoutTargets;
use crate::thresholds::ThresholdTable;

/// Complete rep counter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepCounterConfig {
    /// Angle thresholds per exercise
    pub thresholds: ThresholdTable,

    /// Bicep curl set/rep targets
    pub curl_targets: WorkoutTargets,

    /// Landmarks reporting a lower visibility are treated as missing
    pub min_visibility: f32,

    /// Capacity of the streaming pipeline's outcome queue
    pub output_queue_size: usize,
}

impl Default for RepCounterConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdTable::default(),
            curl_targets: WorkoutTargets::default(),
            min_visibility: 0.5,
            output_queue_size: 256,
        }
    }
}

impl RepCounterConfig {
    /// Load configuration from file, with `POSTURE__*` environment overrides
    pub fn from_file(path: &str) -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("POSTURE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load from environment variables
    pub fn from_env() -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("POSTURE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Reject settings that would make counting meaningless
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_visibility) {
            return Err(Error::Config(format!(
                "min_visibility must be within [0, 1], got {}",
                self.min_visibility
            )));
        }

        if self.output_queue_size == 0 {
            return Err(Error::Config("output_queue_size must be positive".into()));
        }

        let crunch = &self.thresholds.crunch;
        if (crunch.flat_angle - crunch.crunched_angle).abs() < f64::EPSILON {
            return Err(Error::Config(
                "crunch flat_angle and crunched_angle must differ".into(),
            ));
        }
        if crunch.down_percent_at_most >= crunch.up_percent_at_least {
            return Err(Error::Config(
                "crunch down_percent_at_most must be below up_percent_at_least".into(),
            ));
        }

        let curl = &self.thresholds.bicep_curl;
        if curl.up_below >= curl.down_above {
            return Err(Error::Config(
                "bicep curl up_below must be below down_above".into(),
            ));
        }

        let push_up = &self.thresholds.push_up;
        if push_up.down_elbow_at_most >= push_up.up_elbow_above {
            return Err(Error::Config(
                "push-up down_elbow_at_most must be below up_elbow_above".into(),
            ));
        }

        Ok(())
    }
}
