//! Collaborator traits
//!
//! These traits define the interface between the session controller and
//! the host platform: where samples come from, how the screen is kept
//! awake, and how counts are shown and spoken.

pub mod feedback;
pub mod power;
pub mod sensor;

pub use feedback::{FeedbackError, RepFeedback};
pub use power::WakeLock;
pub use sensor::{SampleRate, SensorError, SensorFeed, SensorSample};
