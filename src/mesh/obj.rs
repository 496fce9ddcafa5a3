//! Wavefront OBJ export.
//!
//! Positions carry the common `v x y z r g b` vertex-color extension. Each
//! triangle writes its own three vertices and one normal per vertex; line
//! segments are written as `l` elements over their own vertices.

use std::io::Write;

use super::Mesh;
use crate::error::RibbonError;

/// Write `mesh` as OBJ text.
///
/// # Errors
///
/// Returns [`RibbonError::Io`] if writing fails.
pub fn write_obj<W: Write>(mesh: &Mesh, mut out: W) -> Result<(), RibbonError> {
    writeln!(
        out,
        "# ribbon mesh: {} triangles, {} lines",
        mesh.triangles.len(),
        mesh.lines.len()
    )?;

    for t in &mesh.triangles {
        for v in [t.v1, t.v2, t.v3] {
            let p = v.position;
            let [r, g, b] = v.color;
            writeln!(out, "v {} {} {} {r} {g} {b}", p.x, p.y, p.z)?;
        }
    }
    for t in &mesh.triangles {
        for v in [t.v1, t.v2, t.v3] {
            let n = v.normal;
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }
    for line in &mesh.lines {
        for p in [line.p1, line.p2] {
            writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
        }
    }

    // OBJ indices are 1-based; triangle vertices come first.
    for i in 0..mesh.triangles.len() {
        let a = 3 * i + 1;
        writeln!(out, "f {a}//{a} {}//{} {}//{}", a + 1, a + 1, a + 2, a + 2)?;
    }
    let line_base = 3 * mesh.triangles.len();
    for i in 0..mesh.lines.len() {
        let a = line_base + 2 * i + 1;
        writeln!(out, "l {a} {}", a + 1)?;
    }
    out.flush()?;
    Ok(())
}
