//! Ribbon generation options with TOML preset support.
//!
//! Cross-section dimensions, sampling density, chain palette and the
//! whole-mesh view transforms are consolidated here. Every section uses
//! `#[serde(default)]`, so a preset only needs the values it overrides.

mod colors;
mod ribbon;
mod view;

use std::path::Path;

pub use colors::{ChainPalette, ColorOptions};
pub use ribbon::{FrameMethod, RibbonOptions};
use serde::{Deserialize, Serialize};
pub use view::{Rotation, ViewOptions};

use crate::error::RibbonError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Cross-section and sampling parameters.
    pub ribbon: RibbonOptions,
    /// Chain color palette.
    pub colors: ColorOptions,
    /// Fit and rotation applied to the finished mesh.
    pub view: ViewOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`RibbonError::Io`] if the file cannot be read and
    /// [`RibbonError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, RibbonError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`RibbonError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, RibbonError> {
        toml::from_str(content)
            .map_err(|e| RibbonError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`RibbonError::OptionsParse`] if serialization fails and
    /// [`RibbonError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), RibbonError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RibbonError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the options describe a buildable ribbon.
    ///
    /// # Errors
    ///
    /// Returns [`RibbonError::InvalidOptions`] listing every out-of-range
    /// value, or [`RibbonError::InvalidColor`] for a bad palette entry.
    pub fn validate(&self) -> Result<(), RibbonError> {
        let problems = self.ribbon.problems();
        if !problems.is_empty() {
            return Err(RibbonError::InvalidOptions(problems.join("; ")));
        }
        let _ = self.colors.chain_palette()?;
        Ok(())
    }
}
