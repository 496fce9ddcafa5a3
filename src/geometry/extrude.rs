//! Sweep a cross-section profile along a framed curve.
//!
//! Every sample gets a ring of outline positions. Consecutive rings are
//! stitched into quad strips, closed outlines get a center-fan cap at each
//! end, and the outline's boundary vertices are traced into line segments.

use glam::DVec3;

use super::frame::FramedSample;
use super::profile::Profile;
use crate::mesh::{Line, Mesh, Triangle, Vertex};
use crate::util::color::Color;
use crate::util::vector::VectorExt;

/// Cosine above which two consecutive line steps are merged.
const COLLINEAR_COS: f64 = 1.0 - 1e-10;

/// Extrude `profile` along `curve`, painting every vertex with `color`.
///
/// Produces `2 × edges × (samples − 1)` side triangles plus `edges`
/// triangles per cap when the outline is closed. Fewer than two samples
/// give an empty mesh.
#[must_use]
pub fn extrude(curve: &[FramedSample], profile: &Profile, color: Color) -> Mesh {
    if curve.len() < 2 {
        return Mesh::new();
    }

    let rings: Vec<Vec<DVec3>> = curve
        .iter()
        .map(|s| {
            (0..profile.outline().len())
                .map(|k| s.position + profile.offset(&s.frame, k))
                .collect()
        })
        .collect();

    let caps = if profile.is_closed() { 2 } else { 0 };
    let mut triangles = Vec::with_capacity(
        profile.edge_count() * (2 * (curve.len() - 1) + caps),
    );

    for (pair, ring_pair) in curve.windows(2).zip(rings.windows(2)) {
        emit_segment(
            [&pair[0], &pair[1]],
            [ring_pair[0].as_slice(), ring_pair[1].as_slice()],
            profile,
            color,
            &mut triangles,
        );
    }

    if profile.is_closed() {
        let (first, last) = (&curve[0], &curve[curve.len() - 1]);
        let ends = [
            (first, &rings[0], -first.frame.tangent),
            (last, &rings[rings.len() - 1], last.frame.tangent),
        ];
        for (sample, ring, cap_normal) in ends {
            emit_cap(sample, ring, cap_normal, profile, color, &mut triangles);
        }
    }

    let mut lines = Vec::new();
    for &k in profile.boundary_vertices() {
        let trace: Vec<DVec3> = rings.iter().map(|ring| ring[k]).collect();
        coalesce_trace(&trace, &mut lines);
    }

    Mesh::from_parts(triangles, lines)
}

/// Two triangles per outline edge between consecutive rings.
fn emit_segment(
    samples: [&FramedSample; 2],
    rings: [&[DVec3]; 2],
    profile: &Profile,
    color: Color,
    triangles: &mut Vec<Triangle>,
) {
    let [sa, sb] = samples;
    let [ring_a, ring_b] = rings;

    for (k, k_next) in profile.edges() {
        let v0 = ring_a[k];
        let v1 = ring_a[k_next];
        let v2 = ring_b[k];
        let v3 = ring_b[k_next];

        // Closed outlines face away from the centerline, open strips face
        // along the frame normal.
        let outward = if profile.is_closed() {
            (v0 - sa.position)
                + (v1 - sa.position)
                + (v2 - sb.position)
                + (v3 - sb.position)
        } else {
            sa.frame.normal + sb.frame.normal
        };

        let corners = [
            (v0, sa.position),
            (v1, sa.position),
            (v2, sb.position),
            (v3, sb.position),
        ];
        for [i, j, l] in [[0, 2, 1], [1, 2, 3]] {
            let winding = [corners[i].0, corners[j].0, corners[l].0];
            let [a, b, c] = if winds_against(winding, outward) {
                [corners[i], corners[l], corners[j]]
            } else {
                [corners[i], corners[j], corners[l]]
            };
            let face_normal =
                (b.0 - a.0).cross(c.0 - a.0).normalize_or_zero();
            let vertex = |(position, center): (DVec3, DVec3)| Vertex {
                position,
                normal: side_normal(profile, position - center, face_normal),
                color,
            };
            triangles.push(Triangle::new(vertex(a), vertex(b), vertex(c)));
        }
    }
}

/// Radial normal for smooth outlines, the face normal otherwise.
fn side_normal(profile: &Profile, radial: DVec3, face_normal: DVec3) -> DVec3 {
    if profile.is_smooth() && !radial.is_degenerate() {
        radial.normalize()
    } else {
        face_normal
    }
}

/// Center fan closing one end of a closed outline.
fn emit_cap(
    sample: &FramedSample,
    ring: &[DVec3],
    cap_normal: DVec3,
    profile: &Profile,
    color: Color,
    triangles: &mut Vec<Triangle>,
) {
    let vertex = |p: DVec3| Vertex {
        position: p,
        normal: cap_normal,
        color,
    };
    for (k, k_next) in profile.edges() {
        let (center, a, b) = (sample.position, ring[k], ring[k_next]);
        let [a, b] = if winds_against([center, a, b], cap_normal) {
            [b, a]
        } else {
            [a, b]
        };
        triangles.push(Triangle::new(vertex(center), vertex(a), vertex(b)));
    }
}

/// Whether the winding normal of `a, b, c` opposes `outward`.
fn winds_against([a, b, c]: [DVec3; 3], outward: DVec3) -> bool {
    (b - a).cross(c - a).dot(outward) < 0.0
}

/// Emit the polyline through `points` as segments, merging runs of
/// collinear steps and skipping zero-length ones.
fn coalesce_trace(points: &[DVec3], lines: &mut Vec<Line>) {
    let Some((&first, rest)) = points.split_first() else {
        return;
    };
    let mut start = first;
    let mut end = first;
    let mut direction: Option<DVec3> = None;

    for &p in rest {
        let step = p - end;
        if step.is_degenerate() {
            continue;
        }
        let step_dir = step.normalize();
        let continues =
            direction.is_some_and(|d| d.dot(step_dir) > COLLINEAR_COS);
        if !continues {
            if direction.is_some() {
                lines.push(Line::new(start, end));
                start = end;
            }
            direction = Some(step_dir);
        }
        end = p;
    }

    if direction.is_some() {
        lines.push(Line::new(start, end));
    }
}
