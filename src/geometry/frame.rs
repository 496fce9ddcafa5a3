//! Twist-minimizing frame propagation along a resampled curve.
//!
//! Each frame depends on the previous one, so propagation is an ordered fold
//! over the samples with the framed curve as accumulator.

use glam::DVec3;

use super::spline::CurveSample;
use super::GeometryWarning;
use crate::options::FrameMethod;
use crate::util::vector::VectorExt;

/// Squared projection length below which the previous normal is treated as
/// parallel to the new tangent.
const PARALLEL_EPS_SQ: f64 = 1e-12;

/// Cosine below which two consecutive tangents count as reversed.
const REVERSAL_COS: f64 = -0.99;

/// Orthonormal frame at a curve sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Unit curve tangent.
    pub tangent: DVec3,
    /// Unit normal, orthogonal to the tangent.
    pub normal: DVec3,
    /// `tangent × normal`.
    pub binormal: DVec3,
}

impl Frame {
    /// Frame seeded from the canonical perpendicular of `tangent`.
    #[must_use]
    pub fn seed(tangent: DVec3) -> Self {
        Self::from_normal(tangent, tangent.perpendicular())
    }

    /// Complete a frame from a tangent and a normal already orthogonal to it.
    #[must_use]
    pub fn from_normal(tangent: DVec3, normal: DVec3) -> Self {
        Self {
            tangent,
            normal,
            binormal: tangent.cross(normal),
        }
    }
}

/// A curve sample with its frame attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramedSample {
    /// Sample index.
    pub index: usize,
    /// Position on the curve.
    pub position: DVec3,
    /// Frame at this position.
    pub frame: Frame,
}

/// Framed samples plus every degeneracy recovered while building them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FramedCurve {
    /// Samples in curve order.
    pub samples: Vec<FramedSample>,
    /// Locally recovered degeneracies, in sample order.
    pub warnings: Vec<GeometryWarning>,
}

impl FramedCurve {
    fn push(mut self, sample: &CurveSample, method: FrameMethod) -> Self {
        if sample.tangent_fallback {
            self.warnings.push(GeometryWarning::DegenerateTangent {
                sample: sample.index,
            });
        }

        let frame = match self.samples.last() {
            None => Frame::seed(sample.tangent),
            Some(prev) => {
                if prev.frame.tangent.dot(sample.tangent) < REVERSAL_COS {
                    self.warnings.push(GeometryWarning::TangentReversal {
                        sample: sample.index,
                    });
                }
                let carried = match method {
                    FrameMethod::Projection => prev.frame.normal,
                    FrameMethod::DoubleReflection => {
                        reflect_normal(prev, sample.position, sample.tangent)
                    }
                };
                match project_normal(carried, sample.tangent) {
                    Some(normal) => Frame::from_normal(sample.tangent, normal),
                    None => {
                        self.warnings.push(
                            GeometryWarning::DegenerateFrameSeed {
                                sample: sample.index,
                            },
                        );
                        Frame::seed(sample.tangent)
                    }
                }
            }
        };

        self.samples.push(FramedSample {
            index: sample.index,
            position: sample.position,
            frame,
        });
        self
    }
}

/// Frame every sample in order.
pub fn propagate_frames(
    samples: impl IntoIterator<Item = CurveSample>,
    method: FrameMethod,
) -> FramedCurve {
    let curve = samples
        .into_iter()
        .fold(FramedCurve::default(), |curve, sample| {
            curve.push(&sample, method)
        });
    for warning in &curve.warnings {
        log::debug!("{warning}");
    }
    curve
}

/// Remove the tangent component of `normal` and renormalize. `None` when
/// the remainder is too short, i.e. `normal` is parallel to `tangent`.
fn project_normal(normal: DVec3, tangent: DVec3) -> Option<DVec3> {
    let projected = normal - tangent * normal.dot(tangent);
    (projected.length_squared() >= PARALLEL_EPS_SQ)
        .then(|| projected.normalize())
}

/// Carry the previous normal to `position` by two reflections: across the
/// bisector plane of the chord, then across the plane that maps the
/// reflected tangent onto the new one (Wang et al. 2008).
fn reflect_normal(
    prev: &FramedSample,
    position: DVec3,
    tangent: DVec3,
) -> DVec3 {
    let r_i = prev.frame.normal;
    let t_i = prev.frame.tangent;

    let v1 = position - prev.position;
    let c1 = v1.dot(v1);
    if c1 < PARALLEL_EPS_SQ {
        return r_i;
    }

    // First reflection
    let r_l = r_i - (2.0 / c1) * v1.dot(r_i) * v1;
    let t_l = t_i - (2.0 / c1) * v1.dot(t_i) * v1;

    // Second reflection
    let v2 = tangent - t_l;
    let c2 = v2.dot(v2);
    if c2 < PARALLEL_EPS_SQ {
        r_l
    } else {
        r_l - (2.0 / c2) * v2.dot(r_l) * v2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::spline::Spline;

    fn helix(turns: f64, n: usize) -> Vec<DVec3> {
        (0..n)
            .map(|i| {
                let a = turns * std::f64::consts::TAU * i as f64 / n as f64;
                DVec3::new(2.3 * a.cos(), 2.3 * a.sin(), 1.5 * i as f64)
            })
            .collect()
    }

    fn frames(
        points: &[DVec3],
        density: usize,
        method: FrameMethod,
    ) -> FramedCurve {
        let spline = Spline::new(points.to_vec(), density).unwrap();
        propagate_frames(spline.samples(), method)
    }

    fn assert_orthonormal(curve: &FramedCurve) {
        for s in &curve.samples {
            let f = s.frame;
            assert!((f.tangent.length() - 1.0).abs() < 1e-9, "{s:?}");
            assert!((f.normal.length() - 1.0).abs() < 1e-9, "{s:?}");
            assert!(f.tangent.dot(f.normal).abs() < 1e-9, "{s:?}");
            assert_eq!(f.binormal, f.tangent.cross(f.normal));
            assert!((f.binormal.length() - 1.0).abs() < 1e-9, "{s:?}");
        }
    }

    #[test]
    fn seed_uses_perpendicular() {
        let f = Frame::seed(DVec3::X);
        assert!((f.normal - DVec3::Y).length() < 1e-15);
        assert!((f.binormal - DVec3::Z).length() < 1e-15);

        let f = Frame::seed(DVec3::Z);
        assert_eq!(f.normal, DVec3::Y);
        assert_eq!(f.binormal, DVec3::NEG_X);
    }

    #[test]
    fn frames_are_orthonormal_on_a_helix() {
        for method in [FrameMethod::Projection, FrameMethod::DoubleReflection] {
            let curve = frames(&helix(3.0, 40), 6, method);
            assert_eq!(curve.samples.len(), 6 * 39 + 1);
            assert_orthonormal(&curve);
            assert!(curve.warnings.is_empty(), "{:?}", curve.warnings);
        }
    }

    #[test]
    fn straight_line_frames_are_identical() {
        let pts: Vec<DVec3> = (0..6)
            .map(|i| DVec3::new(1.0, 2.0, 3.0) * f64::from(i))
            .collect();
        for method in [FrameMethod::Projection, FrameMethod::DoubleReflection] {
            let curve = frames(&pts, 5, method);
            let first = curve.samples[0].frame;
            for s in &curve.samples {
                assert!((s.frame.normal - first.normal).length() < 1e-12);
                assert!((s.frame.binormal - first.binormal).length() < 1e-12);
            }
        }
    }

    #[test]
    fn consecutive_normals_rotate_minimally() {
        // On a smooth helix, adjacent normals stay close: no flips.
        let curve = frames(&helix(2.0, 30), 10, FrameMethod::Projection);
        for pair in curve.samples.windows(2) {
            let dot = pair[0].frame.normal.dot(pair[1].frame.normal);
            assert!(dot > 0.9, "normal jumped at sample {}", pair[1].index);
        }
    }

    #[test]
    fn projection_matches_double_reflection_closely() {
        let a = frames(&helix(1.0, 20), 16, FrameMethod::Projection);
        let b = frames(&helix(1.0, 20), 16, FrameMethod::DoubleReflection);
        let last_a = a.samples.last().unwrap().frame.normal;
        let last_b = b.samples.last().unwrap().frame.normal;
        assert!(last_a.dot(last_b) > 0.95, "{last_a:?} vs {last_b:?}");
    }

    #[test]
    fn parallel_normal_reseeds_frame() {
        // Tangent turns from +X to +Y; with a +Y seed normal this is the
        // parallel case.
        let samples = [
            CurveSample {
                index: 0,
                position: DVec3::ZERO,
                tangent: DVec3::X,
                tangent_fallback: false,
            },
            CurveSample {
                index: 1,
                position: DVec3::Y,
                tangent: DVec3::Y,
                tangent_fallback: false,
            },
        ];
        let curve = propagate_frames(samples, FrameMethod::Projection);
        assert_eq!(
            curve.warnings,
            vec![GeometryWarning::DegenerateFrameSeed { sample: 1 }]
        );
        assert_orthonormal(&curve);
        assert_eq!(curve.samples[1].frame, Frame::seed(DVec3::Y));
    }

    #[test]
    fn tangent_reversal_is_reported_and_stays_finite() {
        let samples = [
            CurveSample {
                index: 0,
                position: DVec3::ZERO,
                tangent: DVec3::X,
                tangent_fallback: false,
            },
            CurveSample {
                index: 1,
                position: DVec3::X,
                tangent: DVec3::NEG_X,
                tangent_fallback: false,
            },
        ];
        let curve = propagate_frames(samples, FrameMethod::Projection);
        assert!(curve
            .warnings
            .contains(&GeometryWarning::TangentReversal { sample: 1 }));
        assert_orthonormal(&curve);
        // The normal survives; the binormal flips with the tangent.
        let (f0, f1) = (curve.samples[0].frame, curve.samples[1].frame);
        assert!((f0.normal - f1.normal).length() < 1e-12);
        assert!((f0.binormal + f1.binormal).length() < 1e-12);
    }

    #[test]
    fn fallback_tangents_are_reported() {
        let pts = [DVec3::ZERO, DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0)];
        let curve = frames(&pts, 2, FrameMethod::Projection);
        assert!(curve
            .warnings
            .iter()
            .any(|w| matches!(w, GeometryWarning::DegenerateTangent { .. })));
        assert_orthonormal(&curve);
    }

    #[test]
    fn propagation_is_deterministic() {
        let pts = helix(1.5, 12);
        let a = frames(&pts, 7, FrameMethod::DoubleReflection);
        let b = frames(&pts, 7, FrameMethod::DoubleReflection);
        assert_eq!(a, b);
    }
}
