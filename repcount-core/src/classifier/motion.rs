//! Motion classifier implementation
//!
//! Projects each linear-acceleration sample onto the current gravity
//! estimate, reduces the result to a [`Transition`] symbol, and steps the
//! push-up state machine.

use super::events::{RepEvent, Transition};
use super::state::PushupState;
use crate::config::ClassifierConfig;
use crate::math::{projection, Vector3};

/// Reduce a projected acceleration to a transition symbol
///
/// The projection is first clipped to zero when its magnitude is at or
/// below the noise threshold (NaN is clipped too), then anything within the
/// stop deadband of zero classifies as [`Transition::Stopped`]. Positive
/// values are downward motion.
pub fn classify(projection: f32, config: &ClassifierConfig) -> Transition {
    let clipped = if libm::fabsf(projection) > config.noise_threshold {
        projection
    } else {
        0.0
    };

    if libm::fabsf(clipped) > config.stop_deadband {
        if clipped > 0.0 {
            Transition::Down
        } else {
            Transition::Up
        }
    } else {
        Transition::Stopped
    }
}

/// Repetition counter driven by acceleration and gravity samples
///
/// Callers must deliver samples serially and in arrival order, applying a
/// gravity sample before the acceleration samples it conditions. Until the
/// first gravity sample arrives the estimate is the zero vector and every
/// acceleration sample classifies as stopped.
#[derive(Debug, Clone)]
pub struct MotionClassifier {
    /// Noise suppression settings
    config: ClassifierConfig,
    /// Current "down" direction
    gravity: Vector3,
    /// Current state machine position
    state: PushupState,
    /// Completed repetitions since the last reset
    count: u32,
    /// Projection computed for the most recent acceleration sample
    last_projection: f32,
}

impl Default for MotionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionClassifier {
    /// Create a classifier with the default noise floor
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    /// Create a classifier with custom noise suppression settings
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self {
            config,
            gravity: Vector3::ZERO,
            state: PushupState::StoppedTop,
            count: 0,
            last_projection: 0.0,
        }
    }

    /// Replace the gravity estimate
    pub fn on_gravity_sample(&mut self, gravity: Vector3) {
        self.gravity = gravity;
    }

    /// Classify a linear-acceleration sample and step the state machine
    ///
    /// Returns a [`RepEvent`] when this sample completes a repetition.
    pub fn on_acceleration_sample(&mut self, accel: Vector3) -> Option<RepEvent> {
        self.last_projection = projection(accel, self.gravity);
        let symbol = classify(self.last_projection, &self.config);
        self.on_transition(symbol)
    }

    /// Step the state machine with an already classified symbol
    ///
    /// Pairs outside the transition table leave the state and count alone.
    pub fn on_transition(&mut self, symbol: Transition) -> Option<RepEvent> {
        let prev = self.state;
        let next = prev.transition(symbol)?;
        self.state = next;

        if !prev.completes_rep(next) {
            return None;
        }

        // Once the count is saturated further reps are not reported
        self.count = self.count.checked_add(1)?;
        Some(RepEvent::new(self.count))
    }

    /// Set the count back to zero
    ///
    /// The state machine position and gravity estimate are kept.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Completed repetitions since the last reset
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Current state machine position
    pub fn state(&self) -> PushupState {
        self.state
    }

    /// Current gravity estimate
    pub fn gravity(&self) -> Vector3 {
        self.gravity
    }

    /// Check if a usable (non-zero) gravity estimate has been received
    pub fn has_gravity(&self) -> bool {
        !self.gravity.is_zero()
    }

    /// Projection computed for the most recent acceleration sample
    pub fn last_projection(&self) -> f32 {
        self.last_projection
    }

    /// Noise suppression settings in use
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}
