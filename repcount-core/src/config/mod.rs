//! Classifier configuration
//!
//! Tuning values for the noise floor. Serializable with the `serde` feature
//! so hosts can load them from their own configuration files.

pub mod types;

pub use types::*;
