use super::Vertex;

/// 36-byte packed vertex for GPU upload; `bytemuck::cast_slice` views a
/// slice of them as the raw buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    /// Position (single precision).
    pub position: [f32; 3],
    /// Shading normal.
    pub normal: [f32; 3],
    /// RGB color.
    pub color: [f32; 3],
}

impl From<Vertex> for GpuVertex {
    fn from(v: Vertex) -> Self {
        Self {
            position: v.position.as_vec3().to_array(),
            normal: v.normal.as_vec3().to_array(),
            color: v.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;

    #[test]
    fn packs_into_36_bytes() {
        assert_eq!(size_of::<GpuVertex>(), 36);
        let v = GpuVertex::from(Vertex {
            position: DVec3::new(1.0, 2.0, 3.0),
            normal: DVec3::Z,
            color: [0.25, 0.5, 1.0],
        });
        let verts = [v, v];
        let bytes: &[u8] = bytemuck::cast_slice(&verts[..]);
        assert_eq!(bytes.len(), 72);
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(&floats[..9], &[1.0, 2.0, 3.0, 0.0, 0.0, 1.0, 0.25, 0.5, 1.0]);
    }
}
