//! Counting sessions for the repetition counter
//!
//! This crate wires the board-agnostic [`repcount_core::MotionClassifier`]
//! to the host platform:
//!
//! - `SensorFeed`, `WakeLock`, and `RepFeedback` traits for the sensor
//!   subsystem, screen wake lock, and count display/speech
//! - `SessionController` owning the running flag and the stop-at-target policy
//! - `SessionEvent` channel for async consumers (display, audio, logging tasks)
//! - Session configuration, loadable from TOML
//!
//! # Architecture
//!
//! The classifier only reports repetitions. Everything that reacts to a
//! repetition (showing it, speaking it, stopping at the target) lives in the
//! controller, which depends on the classifier but never the other way round.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

// This must go first so the logging macros are visible to every module
mod fmt;

pub mod channels;
pub mod config;
pub mod controller;
pub mod traits;

pub use channels::{SessionChannel, SessionEvent, SessionSender, EVENT_CHANNEL_SIZE};
pub use config::{ConfigError, SessionConfig, DEFAULT_TARGET, MAX_TARGET};
pub use controller::{format_count, SessionController, SessionError};
pub use traits::{FeedbackError, RepFeedback, SampleRate, SensorError, SensorFeed, SensorSample, WakeLock};
