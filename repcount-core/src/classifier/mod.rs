//! Motion classifier
//!
//! Turns (linear acceleration, gravity) samples into repetition counts.
//! The state machine is explicit, finite, and deterministic: every state
//! change is a function of the current state and one transition symbol.

pub mod events;
pub mod motion;
pub mod state;

pub use events::{RepEvent, Transition};
pub use motion::{classify, MotionClassifier};
pub use state::PushupState;
