use serde::{Deserialize, Serialize};

/// How frames are carried from one curve sample to the next.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FrameMethod {
    /// Project the previous normal onto the plane orthogonal to the new
    /// tangent.
    #[default]
    Projection,
    /// Double-reflection rotation minimizing frames (Wang et al. 2008).
    DoubleReflection,
}

/// Cross-section and sampling parameters for ribbon extrusion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RibbonOptions {
    /// Profile width along the frame binormal, in ångström.
    pub width: f64,
    /// Profile height along the frame normal, in ångström. Zero produces a
    /// flat, open ribbon.
    pub height: f64,
    /// Curve samples per backbone segment.
    pub density: usize,
    /// Outline vertices of a closed (non-flat) cross-section.
    pub cross_section_verts: usize,
    /// Blend between a rectangular (0) and elliptical (1) cross-section.
    pub roundness: f64,
    /// Frame propagation method.
    pub frame_method: FrameMethod,
}

impl Default for RibbonOptions {
    fn default() -> Self {
        Self {
            width: 3.0,
            height: 1.0,
            density: 8,
            cross_section_verts: 4,
            roundness: 0.0,
            frame_method: FrameMethod::Projection,
        }
    }
}

impl RibbonOptions {
    /// Flat ribbon of the given width.
    #[must_use]
    pub fn flat(width: f64, density: usize) -> Self {
        Self {
            width,
            height: 0.0,
            density,
            ..Self::default()
        }
    }

    /// Whether the cross-section collapses to a line segment.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.height <= 0.0
    }

    /// Problems that would make extrusion meaningless, as messages.
    #[must_use]
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.width.is_finite() || self.width < 0.0 {
            problems.push(format!(
                "ribbon.width must be >= 0 (got {})",
                self.width
            ));
        }
        if !self.height.is_finite() || self.height < 0.0 {
            problems.push(format!(
                "ribbon.height must be >= 0 (got {})",
                self.height
            ));
        }
        if self.density == 0 {
            problems.push("ribbon.density must be at least 1".to_owned());
        }
        if self.cross_section_verts < 3 {
            problems.push(format!(
                "ribbon.cross_section_verts must be at least 3 (got {})",
                self.cross_section_verts
            ));
        }
        if !(0.0..=1.0).contains(&self.roundness) {
            problems.push(format!(
                "ribbon.roundness must be within [0, 1] (got {})",
                self.roundness
            ));
        }
        problems
    }
}
