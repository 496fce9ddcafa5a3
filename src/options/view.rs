use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;

/// A rotation about an arbitrary axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rotation {
    /// Rotation axis; normalized before use.
    pub axis: [f64; 3],
    /// Angle in degrees (right-hand rule).
    pub degrees: f64,
}

impl Rotation {
    /// Rotation matrix, or `None` for a zero-length axis.
    #[must_use]
    pub fn matrix(&self) -> Option<DMat4> {
        let axis = DVec3::from(self.axis).try_normalize()?;
        Some(DMat4::from_axis_angle(axis, self.degrees.to_radians()))
    }
}

/// Whole-mesh transforms applied before export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewOptions {
    /// Scale and center the mesh into the [-1, 1] cube.
    pub fit_to_unit_cube: bool,
    /// Rotations applied in order after fitting.
    pub rotations: Vec<Rotation>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            fit_to_unit_cube: true,
            rotations: vec![
                Rotation {
                    axis: [0.0, 0.0, 1.0],
                    degrees: -30.0,
                },
                Rotation {
                    axis: [1.0, 0.0, 0.0],
                    degrees: -60.0,
                },
            ],
        }
    }
}

impl ViewOptions {
    /// Product of the configured rotations, first rotation applied first.
    /// Rotations with a zero axis are skipped.
    #[must_use]
    pub fn rotation_matrix(&self) -> DMat4 {
        self.rotations
            .iter()
            .fold(DMat4::IDENTITY, |acc, r| match r.matrix() {
                Some(m) => m * acc,
                None => {
                    log::warn!("ignoring rotation with zero axis {:?}", r.axis);
                    acc
                }
            })
    }

    /// Fit `mesh` (if enabled) and rotate it about the origin. Returns the
    /// combined matrix applied to positions.
    pub fn apply(&self, mesh: &mut Mesh) -> DMat4 {
        let fit = if self.fit_to_unit_cube {
            mesh.bi_unit_cube()
        } else {
            DMat4::IDENTITY
        };
        let rotation = self.rotation_matrix();
        mesh.transform(&rotation);
        rotation * fit
    }
}
