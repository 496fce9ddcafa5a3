//! Triangle + line mesh handed to the rendering collaborator.
//!
//! Vertices are not shared: each [`Triangle`] owns three [`Vertex`] values
//! and each [`Line`] two endpoints. Whole-mesh transforms are a single
//! affine map applied uniformly, so triangle and line invariants survive
//! fitting and rotation.

mod gpu;
mod obj;

use glam::{DMat4, DVec3};
pub use gpu::GpuVertex;
pub use obj::write_obj;

use crate::util::color::Color;

/// A mesh vertex: position, shading normal and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space.
    pub position: DVec3,
    /// Unit shading normal (zero for degenerate faces).
    pub normal: DVec3,
    /// RGB color.
    pub color: Color,
}

/// A colored triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v1: Vertex,
    /// Second vertex.
    pub v2: Vertex,
    /// Third vertex.
    pub v3: Vertex,
}

impl Triangle {
    /// Triangle from three vertices in winding order.
    #[must_use]
    pub fn new(v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        Self { v1, v2, v3 }
    }

    /// Geometric face normal from the winding order (zero if degenerate).
    #[must_use]
    pub fn normal(&self) -> DVec3 {
        let e1 = self.v2.position - self.v1.position;
        let e2 = self.v3.position - self.v1.position;
        e1.cross(e2).normalize_or_zero()
    }

    /// Surface area.
    #[must_use]
    pub fn area(&self) -> f64 {
        let e1 = self.v2.position - self.v1.position;
        let e2 = self.v3.position - self.v1.position;
        e1.cross(e2).length() * 0.5
    }

    /// Vertex positions in winding order.
    #[must_use]
    pub fn positions(&self) -> [DVec3; 3] {
        [self.v1.position, self.v2.position, self.v3.position]
    }

    fn vertices_mut(&mut self) -> [&mut Vertex; 3] {
        [&mut self.v1, &mut self.v2, &mut self.v3]
    }
}

/// A line segment used for outline strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Start point.
    pub p1: DVec3,
    /// End point.
    pub p2: DVec3,
}

impl Line {
    /// Segment between two points.
    #[must_use]
    pub fn new(p1: DVec3, p2: DVec3) -> Self {
        Self { p1, p2 }
    }

    /// Segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Aabb {
    /// Box spanning two corners.
    #[must_use]
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Smallest box holding every point, `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        points.into_iter().fold(None, |acc: Option<Self>, p| {
            Some(acc.map_or(Self::new(p, p), |b| {
                Self::new(b.min.min(p), b.max.max(p))
            }))
        })
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

}

/// Ordered colored triangles plus ordered outline segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Filled surface.
    pub triangles: Vec<Triangle>,
    /// Outline strokes drawn on top of the surface.
    pub lines: Vec<Line>,
}

impl Mesh {
    /// Empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mesh from parts.
    #[must_use]
    pub fn from_parts(triangles: Vec<Triangle>, lines: Vec<Line>) -> Self {
        Self { triangles, lines }
    }

    /// Whether the mesh has neither triangles nor lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.lines.is_empty()
    }

    /// Append another mesh, preserving order.
    pub fn add(&mut self, other: Self) {
        self.triangles.extend(other.triangles);
        self.lines.extend(other.lines);
    }

    /// Concatenate meshes in iteration order.
    #[must_use]
    pub fn concat(meshes: impl IntoIterator<Item = Self>) -> Self {
        meshes.into_iter().fold(Self::new(), |mut acc, m| {
            acc.add(m);
            acc
        })
    }

    /// Bounds of all triangle and line positions.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        let tri_points = self.triangles.iter().flat_map(Triangle::positions);
        let line_points = self.lines.iter().flat_map(|l| [l.p1, l.p2]);
        Aabb::from_points(tri_points.chain(line_points))
    }

    /// Whether every position and normal is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        let tris = self.triangles.iter().all(|t| {
            [t.v1, t.v2, t.v3]
                .iter()
                .all(|v| v.position.is_finite() && v.normal.is_finite())
        });
        tris && self.lines.iter().all(|l| l.p1.is_finite() && l.p2.is_finite())
    }

    /// Apply an affine transform to every vertex. Normals use the
    /// inverse-transpose and are renormalized.
    pub fn transform(&mut self, matrix: &DMat4) {
        let normal_matrix = matrix.inverse().transpose();
        for t in &mut self.triangles {
            for v in t.vertices_mut() {
                v.position = matrix.transform_point3(v.position);
                v.normal = normal_matrix
                    .transform_vector3(v.normal)
                    .normalize_or_zero();
            }
        }
        for l in &mut self.lines {
            l.p1 = matrix.transform_point3(l.p1);
            l.p2 = matrix.transform_point3(l.p2);
        }
    }

    /// Uniformly scale and translate the mesh to fit inside `target`.
    /// `anchor` picks where leftover space goes on each axis (0 = min side,
    /// 0.5 = centered, 1 = max side). Returns the applied matrix.
    pub fn fit_inside(&mut self, target: Aabb, anchor: DVec3) -> DMat4 {
        let Some(bounds) = self.bounding_box() else {
            return DMat4::IDENTITY;
        };
        let size = bounds.size();
        let target_size = target.size();
        let scale = [0, 1, 2]
            .into_iter()
            .filter(|&axis| size[axis] > 0.0)
            .map(|axis| target_size[axis] / size[axis])
            .fold(f64::INFINITY, f64::min);
        let scale = if scale.is_finite() { scale } else { 1.0 };
        let extra = target_size - size * scale;
        let matrix = DMat4::from_translation(target.min + extra * anchor)
            * DMat4::from_scale(DVec3::splat(scale))
            * DMat4::from_translation(-bounds.min);
        self.transform(&matrix);
        matrix
    }

    /// Fit into the centered [-1, 1] cube.
    pub fn bi_unit_cube(&mut self) -> DMat4 {
        self.fit_inside(
            Aabb::new(DVec3::splat(-1.0), DVec3::ONE),
            DVec3::splat(0.5),
        )
    }

    /// Fit into the [0, 1] cube, centered.
    pub fn unit_cube(&mut self) -> DMat4 {
        self.fit_inside(Aabb::new(DVec3::ZERO, DVec3::ONE), DVec3::splat(0.5))
    }

    /// Packed vertex stream for GPU upload, three per triangle.
    #[must_use]
    pub fn gpu_vertices(&self) -> Vec<GpuVertex> {
        self.triangles
            .iter()
            .flat_map(|t| [t.v1, t.v2, t.v3])
            .map(GpuVertex::from)
            .collect()
    }

    /// Packed line endpoints, two per segment.
    #[must_use]
    pub fn gpu_line_vertices(&self) -> Vec<[f32; 3]> {
        self.lines
            .iter()
            .flat_map(|l| [l.p1, l.p2])
            .map(|p| p.as_vec3().to_array())
            .collect()
    }
}
