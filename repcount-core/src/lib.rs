//! Board-agnostic core logic for the repetition counter
//!
//! This crate contains the parts of the counter that do not depend on any
//! sensor, display, or speech hardware:
//!
//! - Vector math (normalization, dot product, scalar projection)
//! - Motion classifier (noise floor, transition symbols, push-up state machine)
//! - Classifier configuration
//!
//! Everything here is synchronous and allocation-free. The classifier is fed
//! one sample at a time and reports a [`RepEvent`] whenever a repetition
//! completes.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod classifier;
pub mod config;
pub mod math;

pub use classifier::{MotionClassifier, PushupState, RepEvent, Transition};
pub use config::ClassifierConfig;
pub use math::Vector3;
