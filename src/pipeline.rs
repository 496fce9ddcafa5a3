//! Chain and model ribbon builders.
//!
//! A chain runs through spline → frames → extrusion on its own. A model
//! fans its chains out over the rayon pool and concatenates the resulting
//! meshes in chain order, so the output does not depend on scheduling.

use glam::DVec3;
use rayon::prelude::*;

use crate::error::RibbonError;
use crate::geometry::{extrude, propagate_frames, FramedCurve, Profile, Spline};
use crate::mesh::Mesh;
use crate::options::{ChainPalette, RibbonOptions};
use crate::structure::{Chain, Model};
use crate::util::color::{to_hex, Color};

/// Resample a chain's backbone and frame every sample.
///
/// # Errors
///
/// Returns [`RibbonError::InsufficientControlPoints`] when the chain has
/// fewer than two backbone positions.
pub fn trace_chain(
    chain: &Chain,
    options: &RibbonOptions,
) -> Result<FramedCurve, RibbonError> {
    let points: Vec<DVec3> = chain
        .control_points()?
        .into_iter()
        .map(|cp| cp.position)
        .collect();
    let found = points.len();
    let spline = Spline::new(points, options.density).ok_or_else(|| {
        RibbonError::InsufficientControlPoints {
            chain: chain.id.clone(),
            found,
        }
    })?;
    Ok(propagate_frames(spline.samples(), options.frame_method))
}

/// Build the ribbon mesh of one chain, painted with `color`.
///
/// # Errors
///
/// Returns [`RibbonError::InsufficientControlPoints`] when the chain has
/// fewer than two backbone positions.
pub fn chain_ribbon(
    chain: &Chain,
    options: &RibbonOptions,
    color: Color,
) -> Result<Mesh, RibbonError> {
    let curve = trace_chain(chain, options)?;
    let profile = Profile::from_options(options);
    let mesh = extrude(&curve.samples, &profile, color);
    log::debug!(
        "chain {} (#{}): {} samples, {} triangles, {} lines, {} warnings",
        chain.id,
        to_hex(color),
        curve.samples.len(),
        mesh.triangles.len(),
        mesh.lines.len(),
        curve.warnings.len()
    );
    Ok(mesh)
}

/// Build ribbons for every chain of `model` in parallel. Chain `i` gets
/// `palette.color_for(i)`. Chains that cannot be swept are logged and
/// contribute nothing.
#[must_use]
pub fn model_ribbon(
    model: &Model,
    options: &RibbonOptions,
    palette: &ChainPalette,
) -> Mesh {
    let meshes: Vec<Mesh> = model
        .chains()
        .par_iter()
        .enumerate()
        .map(|(i, chain)| {
            chain_ribbon(chain, options, palette.color_for(i))
                .unwrap_or_else(|e| {
                    log::warn!("skipping chain {}: {e}", chain.id);
                    Mesh::new()
                })
        })
        .collect();
    Mesh::concat(meshes)
}
