//! Transition symbols and classifier output events

/// Symbolic classification of one acceleration sample relative to gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Accelerating against gravity
    Up,
    /// Accelerating along gravity
    Down,
    /// No acceleration above the noise floor
    Stopped,
}

/// Emitted when a repetition completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepEvent {
    /// Repetition count after the increment
    pub count: u32,
}

impl RepEvent {
    /// Create an event for the given count
    pub const fn new(count: u32) -> Self {
        Self { count }
    }
}
