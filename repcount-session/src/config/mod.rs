//! Session configuration
//!
//! Target count, speech, and sample rate settings, loadable from TOML.

pub mod toml;
pub mod types;

pub use types::*;
