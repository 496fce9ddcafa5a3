//! Catmull-Rom resampling of backbone control points.
//!
//! Phantom end points are reflected (`2·p0 − p1`), so the curve passes
//! exactly through every control point: sample `k · density` is control
//! point `k`. Tangents come from the analytic first derivative.
//!
//! Repeated control points never enter a kernel as neighbours: each segment
//! reaches back and ahead to the nearest distinct point. A segment between
//! two coincident points stays put and takes its tangent from the chord to
//! the next distinct point.

use glam::DVec3;

use crate::util::vector::VectorExt;

/// A point on the resampled curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Sample index, also the index of the frame built for it.
    pub index: usize,
    /// Position on the curve.
    pub position: DVec3,
    /// Unit tangent.
    pub tangent: DVec3,
    /// The derivative vanished here and the tangent is a chord fallback.
    pub tangent_fallback: bool,
}

/// A resampled Catmull-Rom curve through at least two control points.
#[derive(Debug, Clone, PartialEq)]
pub struct Spline {
    points: Vec<DVec3>,
    density: usize,
}

impl Spline {
    /// Curve through `points` with `density` samples per segment (clamped
    /// to at least 1). Returns `None` for fewer than two points.
    #[must_use]
    pub fn new(points: Vec<DVec3>, density: usize) -> Option<Self> {
        (points.len() >= 2).then(|| Self {
            points,
            density: density.max(1),
        })
    }

    /// Control points.
    #[must_use]
    pub fn control_points(&self) -> &[DVec3] {
        &self.points
    }

    /// Samples per segment.
    #[must_use]
    pub fn density(&self) -> usize {
        self.density
    }

    /// `density × (n − 1) + 1`.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.density * (self.points.len() - 1) + 1
    }

    /// Lazily evaluate every sample in order.
    #[must_use]
    pub fn samples(&self) -> Samples<'_> {
        Samples {
            spline: self,
            next: 0,
            prev_tangent: None,
        }
    }

    /// Segment index and local parameter of sample `k`.
    fn locate(&self, k: usize) -> (usize, f64) {
        let last_segment = self.points.len() - 2;
        let segment = (k / self.density).min(last_segment);
        let t = (k - segment * self.density) as f64 / self.density as f64;
        (segment, t)
    }

    /// Whether `segment` joins two coincident control points.
    fn is_collapsed(&self, segment: usize) -> bool {
        (self.points[segment + 1] - self.points[segment]).is_degenerate()
    }

    /// The four kernel points of `segment`. The outer two are the nearest
    /// control points distinct from the segment ends, or reflected phantoms
    /// when none exist.
    fn kernel(&self, segment: usize) -> [DVec3; 4] {
        let p = &self.points;
        let (p1, p2) = (p[segment], p[segment + 1]);
        let p0 = p[..segment]
            .iter()
            .rev()
            .copied()
            .find(|&q| !(q - p1).is_degenerate())
            .unwrap_or_else(|| p1 * 2.0 - p2);
        let p3 = p[segment + 2..]
            .iter()
            .copied()
            .find(|&q| !(q - p2).is_degenerate())
            .unwrap_or_else(|| p2 * 2.0 - p1);
        [p0, p1, p2, p3]
    }

    /// Curve position at parameter `t` of `segment`.
    #[must_use]
    pub fn position(&self, segment: usize, t: f64) -> DVec3 {
        if self.points.len() == 2 {
            return self.points[0].lerp(self.points[1], t);
        }
        if self.is_collapsed(segment) {
            return self.points[segment];
        }
        let [p0, p1, p2, p3] = self.kernel(segment);
        let t2 = t * t;
        let t3 = t2 * t;
        0.5 * ((2.0 * p1)
            + (-p0 + p2) * t
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
            + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
    }

    /// First derivative with respect to `t` (not normalized). Zero on a
    /// collapsed segment.
    #[must_use]
    pub fn derivative(&self, segment: usize, t: f64) -> DVec3 {
        if self.points.len() == 2 {
            return self.points[1] - self.points[0];
        }
        if self.is_collapsed(segment) {
            return DVec3::ZERO;
        }
        let [p0, p1, p2, p3] = self.kernel(segment);
        0.5 * ((-p0 + p2)
            + 2.0 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t
            + 3.0 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t * t)
    }

    /// Direction from control point `from` to the next distinct control
    /// point, or from the previous distinct one when none lies ahead.
    fn chord_direction(&self, from: usize) -> Option<DVec3> {
        let anchor = self.points[from];
        let ahead = self.points[from + 1..]
            .iter()
            .map(|&p| p - anchor)
            .find(|d| !d.is_degenerate());
        let behind = || {
            self.points[..from]
                .iter()
                .rev()
                .map(|&p| anchor - p)
                .find(|d| !d.is_degenerate())
        };
        ahead.or_else(behind).map(DVec3::normalize)
    }
}

/// Lazy iterator over the samples of a [`Spline`].
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    spline: &'a Spline,
    next: usize,
    prev_tangent: Option<DVec3>,
}

impl Iterator for Samples<'_> {
    type Item = CurveSample;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next;
        if index >= self.spline.sample_count() {
            return None;
        }
        self.next += 1;

        let (segment, t) = self.spline.locate(index);
        let position = self.spline.position(segment, t);
        let derivative = self.spline.derivative(segment, t);

        let (tangent, tangent_fallback) = if derivative.is_degenerate() {
            let fallback = self
                .spline
                .chord_direction(segment)
                .or(self.prev_tangent)
                .unwrap_or(DVec3::X);
            log::debug!("degenerate tangent at sample {index}, using chord");
            (fallback, true)
        } else {
            (derivative.normalize(), false)
        };
        self.prev_tangent = Some(tangent);

        Some(CurveSample {
            index,
            position,
            tangent,
            tangent_fallback,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.spline.sample_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples<'_> {}
