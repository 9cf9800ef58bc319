//! Classifier configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default noise floor, in sensor acceleration units (m/s²)
pub const NOISE_THRESHOLD: f32 = 2.0;

/// Default residual deadband around zero applied after the noise floor
pub const STOP_DEADBAND: f32 = 0.01;

/// Reason a classifier configuration was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigFault {
    /// Noise threshold is negative or not finite
    NoiseThreshold,
    /// Stop deadband is negative or not finite
    StopDeadband,
}

/// Noise suppression settings for the motion classifier
///
/// A projected acceleration first has its magnitude compared against
/// `noise_threshold` (anything at or below it is clipped to zero), and the
/// result is then compared against `stop_deadband` to decide whether the
/// device is stopped.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierConfig {
    /// Projections with magnitude at or below this are treated as no motion
    pub noise_threshold: f32,
    /// Projections within this distance of zero classify as stopped
    pub stop_deadband: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            noise_threshold: NOISE_THRESHOLD,
            stop_deadband: STOP_DEADBAND,
        }
    }
}

impl ClassifierConfig {
    /// Create a configuration with a custom noise threshold
    pub const fn with_noise_threshold(noise_threshold: f32) -> Self {
        Self {
            noise_threshold,
            stop_deadband: STOP_DEADBAND,
        }
    }

    /// Check that both thresholds are finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigFault> {
        if !self.noise_threshold.is_finite() || self.noise_threshold < 0.0 {
            return Err(ConfigFault::NoiseThreshold);
        }
        if !self.stop_deadband.is_finite() || self.stop_deadband < 0.0 {
            return Err(ConfigFault::StopDeadband);
        }
        Ok(())
    }
}
