//! Vector math
//!
//! Small 3-vector helpers used to find the component of the measured
//! acceleration along the gravity axis.

pub mod vector;

pub use vector::{dot, projection, unit_vector, Vector3};
