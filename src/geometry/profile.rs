//! Cross-section profiles swept along the framed curve.
//!
//! Outline coordinates are `(x, y)` in the frame's (binormal, normal) plane:
//! width runs along the binormal, height along the normal.

use std::f64::consts::TAU;

use glam::{DVec2, DVec3};

use super::frame::Frame;
use crate::options::RibbonOptions;
use crate::util::vector::DEGENERATE_LENGTH_SQ;

/// Relative tolerance when picking the widest outline vertices.
const BOUNDARY_EPS: f64 = 1e-9;

/// A 2D cross-section outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    outline: Vec<DVec2>,
    closed: bool,
    smooth: bool,
    boundary: Vec<usize>,
}

impl Profile {
    /// Build the profile described by `options`: flat when the height is
    /// zero, otherwise a closed outline.
    #[must_use]
    pub fn from_options(options: &RibbonOptions) -> Self {
        if options.is_flat() {
            Self::flat(options.width)
        } else {
            Self::closed(
                options.width,
                options.height,
                options.cross_section_verts,
                options.roundness,
            )
        }
    }

    /// Open two-vertex outline: a flat strip of the given width. Both
    /// vertices trace boundary edges.
    #[must_use]
    pub fn flat(width: f64) -> Self {
        let hw = width * 0.5;
        Self {
            outline: vec![DVec2::new(-hw, 0.0), DVec2::new(hw, 0.0)],
            closed: false,
            smooth: false,
            boundary: vec![0, 1],
        }
    }

    /// Closed outline with `verts` vertices (at least 3), blending a
    /// `width × height` rectangle (`roundness = 0`) into the inscribed
    /// ellipse (`roundness = 1`). Vertices sit at half-step angles; on the
    /// rectangle each one is pushed along its ellipse direction out to the
    /// perimeter, so four vertices give the corners and more vertices stay
    /// distinct.
    #[must_use]
    pub fn closed(width: f64, height: f64, verts: usize, roundness: f64) -> Self {
        let verts = verts.max(3);
        let hw = width * 0.5;
        let ht = height * 0.5;
        let roundness = roundness.clamp(0.0, 1.0);

        let outline: Vec<DVec2> = (0..verts)
            .map(|k| {
                let angle = (k as f64 + 0.5) / verts as f64 * TAU;
                let (sin_a, cos_a) = angle.sin_cos();

                // Elliptical position
                let circ = DVec2::new(cos_a * hw, sin_a * ht);
                // Same direction pushed out to the rectangle's perimeter
                let reach = cos_a.abs().max(sin_a.abs());
                let rect = circ / reach;

                rect + (circ - rect) * roundness
            })
            .collect();

        let widest = outline.iter().map(|p| p.x.abs()).fold(0.0, f64::max);
        let mut boundary: Vec<usize> = Vec::new();
        for (k, p) in outline.iter().enumerate() {
            let on_edge = p.x.abs() >= widest * (1.0 - BOUNDARY_EPS);
            let repeated = boundary
                .iter()
                .any(|&b| (outline[b] - *p).length_squared() < DEGENERATE_LENGTH_SQ);
            if on_edge && !repeated {
                boundary.push(k);
            }
        }

        Self {
            outline,
            closed: true,
            smooth: roundness > 0.5,
            boundary,
        }
    }

    /// Outline vertices.
    #[must_use]
    pub fn outline(&self) -> &[DVec2] {
        &self.outline
    }

    /// Whether the outline is a loop (and the ribbon needs caps).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Whether side vertices get smooth radial normals instead of face
    /// normals.
    #[must_use]
    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    /// Outline vertices whose longitudinal traces are emitted as lines.
    #[must_use]
    pub fn boundary_vertices(&self) -> &[usize] {
        &self.boundary
    }

    /// Number of outline edges: `n` for a loop, `n − 1` for an open strip.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        if self.closed {
            self.outline.len()
        } else {
            self.outline.len() - 1
        }
    }

    /// Outline edges as `(k, k_next)` vertex index pairs.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.outline.len();
        (0..self.edge_count()).map(move |k| (k, (k + 1) % n))
    }

    /// World-space offset of outline vertex `k` in `frame`.
    #[must_use]
    pub fn offset(&self, frame: &Frame, k: usize) -> DVec3 {
        let p = self.outline[k];
        frame.binormal * p.x + frame.normal * p.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_profile_is_one_open_edge() {
        let p = Profile::flat(2.0);
        assert!(!p.is_closed());
        assert_eq!(p.edge_count(), 1);
        assert_eq!(p.edges().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(p.boundary_vertices(), &[0, 1]);
        assert_eq!(p.outline()[0], DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn four_vertex_closed_profile_is_a_rectangle() {
        let p = Profile::closed(3.0, 1.0, 4, 0.0);
        assert!(p.is_closed());
        assert!(!p.is_smooth());
        assert_eq!(p.edge_count(), 4);
        let expected = [
            DVec2::new(1.5, 0.5),
            DVec2::new(-1.5, 0.5),
            DVec2::new(-1.5, -0.5),
            DVec2::new(1.5, -0.5),
        ];
        for (got, want) in p.outline().iter().zip(expected) {
            assert!((*got - want).length() < 1e-12, "{got:?} vs {want:?}");
        }
        assert_eq!(p.edges().last(), Some((3, 0)));
        // Every rectangle corner is at full width.
        assert_eq!(p.boundary_vertices(), &[0, 1, 2, 3]);
    }

    #[test]
    fn many_vertex_rectangle_keeps_vertices_distinct() {
        for verts in [5, 6, 8, 12] {
            let p = Profile::closed(3.0, 1.0, verts, 0.0);
            let outline = p.outline();
            for (k, v) in outline.iter().enumerate() {
                // On the rectangle's perimeter.
                let on_side = (v.x.abs() - 1.5).abs() < 1e-12;
                let on_cap = (v.y.abs() - 0.5).abs() < 1e-12;
                assert!(on_side || on_cap, "{verts} verts: {v:?}");
                assert!(v.x.abs() <= 1.5 + 1e-12 && v.y.abs() <= 0.5 + 1e-12);
                let next = outline[(k + 1) % outline.len()];
                assert!((next - *v).length() > 1e-6, "{verts} verts: edge {k}");
            }
            let boundary = p.boundary_vertices();
            assert!(!boundary.is_empty());
            for (i, &a) in boundary.iter().enumerate() {
                for &b in &boundary[i + 1..] {
                    assert!((outline[a] - outline[b]).length() > 1e-6);
                }
            }
        }
    }

    #[test]
    fn eight_vertex_rectangle_puts_two_vertices_per_long_side() {
        let p = Profile::closed(3.0, 1.0, 8, 0.0);
        let sides: Vec<DVec2> =
            p.boundary_vertices().iter().map(|&k| p.outline()[k]).collect();
        assert_eq!(sides.len(), 4);
        let tan = (std::f64::consts::PI / 8.0).tan();
        assert!((sides[0] - DVec2::new(1.5, 0.5 * tan)).length() < 1e-12);
    }

    #[test]
    fn round_profile_is_elliptical_and_smooth() {
        let p = Profile::closed(4.0, 2.0, 16, 1.0);
        assert!(p.is_smooth());
        for v in p.outline() {
            // On the ellipse x²/a² + y²/b² = 1.
            let e = (v.x / 2.0).powi(2) + (v.y / 1.0).powi(2);
            assert!((e - 1.0).abs() < 1e-12, "{v:?}");
        }
        assert!(!p.boundary_vertices().is_empty());
        assert!(p.boundary_vertices().len() < 16);
    }

    #[test]
    fn from_options_picks_flat_for_zero_height() {
        let flat = Profile::from_options(&RibbonOptions::flat(1.0, 2));
        assert!(!flat.is_closed());
        let boxy = Profile::from_options(&RibbonOptions::default());
        assert!(boxy.is_closed());
        assert_eq!(boxy.edge_count(), 4);
    }

    #[test]
    fn offset_maps_width_to_binormal_and_height_to_normal() {
        let frame = Frame::from_normal(DVec3::X, DVec3::Y);
        let p = Profile::closed(2.0, 1.0, 4, 0.0);
        let o = p.offset(&frame, 0);
        // binormal = X × Y = Z
        assert!((o - DVec3::new(0.0, 0.5, 1.0)).length() < 1e-12);
    }

    #[test]
    fn too_few_vertices_are_raised_to_three() {
        let p = Profile::closed(1.0, 1.0, 1, 0.5);
        assert_eq!(p.outline().len(), 3);
        assert_eq!(p.edge_count(), 3);
    }
}
