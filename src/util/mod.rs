//! Vector helpers and color parsing shared across the crate.

pub mod color;
pub mod vector;
