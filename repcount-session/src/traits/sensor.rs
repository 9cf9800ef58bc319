//! Sensor feed trait and sample types

use core::fmt;

use repcount_core::Vector3;
use serde::{Deserialize, Serialize};

/// Errors that can occur when subscribing to sensor samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Device has no linear-acceleration sensor
    LinearAccelerationUnavailable,
    /// Device has no gravity sensor
    GravityUnavailable,
    /// Platform refused the listener registration
    RegistrationFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::LinearAccelerationUnavailable => {
                f.write_str("linear acceleration sensor unavailable")
            }
            SensorError::GravityUnavailable => f.write_str("gravity sensor unavailable"),
            SensorError::RegistrationFailed => f.write_str("sensor listener registration failed"),
        }
    }
}

/// Requested sample delivery rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "lowercase")]
pub enum SampleRate {
    /// As fast as the hardware allows
    Fastest,
    /// Rate suitable for games (~50 Hz)
    #[default]
    Game,
    /// Rate suitable for UI updates (~15 Hz)
    Ui,
    /// Rate suitable for screen orientation changes (~5 Hz)
    Normal,
}

impl SampleRate {
    /// Nominal delay between samples in microseconds
    pub const fn nominal_period_us(&self) -> u32 {
        match self {
            SampleRate::Fastest => 0,
            SampleRate::Game => 20_000,
            SampleRate::Ui => 66_667,
            SampleRate::Normal => 200_000,
        }
    }
}

/// One sample delivered by the sensor feed
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorSample {
    /// Acceleration with gravity removed
    LinearAcceleration(Vector3),
    /// Current gravity vector
    Gravity(Vector3),
}

/// Trait for the platform sensor subsystem
///
/// Once subscribed, the host delivers both sample kinds to
/// [`SessionController::on_sample`](crate::SessionController::on_sample)
/// serially and in arrival order.
pub trait SensorFeed {
    /// Start delivering linear-acceleration and gravity samples
    fn subscribe(&mut self, rate: SampleRate) -> Result<(), SensorError>;

    /// Stop delivering samples
    fn unsubscribe(&mut self);
}
