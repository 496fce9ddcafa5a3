//! Ribbon geometry: spline resampling, frame propagation and cross-section
//! extrusion.
//!
//! The stages are pure functions of their inputs:
//! control points → [`spline::Spline`] → [`frame::propagate_frames`] →
//! [`extrude::extrude`]. Degenerate geometry is repaired inside the stage
//! that finds it and reported as a [`GeometryWarning`], never as an error.

pub mod extrude;
pub mod frame;
pub mod profile;
pub mod spline;

use std::fmt;

pub use extrude::extrude;
pub use frame::{propagate_frames, Frame, FramedCurve, FramedSample};
pub use profile::Profile;
pub use spline::{CurveSample, Spline};

/// A degenerate configuration that was recovered locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryWarning {
    /// The curve derivative vanished (coincident control points); the
    /// tangent fell back to a chord direction.
    DegenerateTangent {
        /// Curve sample index.
        sample: usize,
    },
    /// The previous normal was parallel to the new tangent; the frame was
    /// reseeded from the tangent.
    DegenerateFrameSeed {
        /// Curve sample index.
        sample: usize,
    },
    /// Consecutive tangents point in nearly opposite directions; the
    /// binormal flips sign across this sample.
    TangentReversal {
        /// Curve sample index.
        sample: usize,
    },
}

impl fmt::Display for GeometryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateTangent { sample } => {
                write!(f, "degenerate tangent at sample {sample}")
            }
            Self::DegenerateFrameSeed { sample } => {
                write!(f, "frame reseeded at sample {sample}")
            }
            Self::TangentReversal { sample } => {
                write!(f, "tangent reversal at sample {sample}")
            }
        }
    }
}
