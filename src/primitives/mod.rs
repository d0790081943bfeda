//! Core compute primitives.
//!
//! Samples, reduced coordinates and feature matrices are all stored as a
//! row-major [`Matrix`]; one row per observation.

mod matrix;

pub use matrix::Matrix;
