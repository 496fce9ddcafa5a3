use serde::{Deserialize, Serialize};

use crate::error::RibbonError;
use crate::util::color::{parse_hex_color, Color, FALLBACK_COLOR};

/// Per-chain color palette options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Hex colors cycled over chains.
    pub palette: Vec<String>,
    /// Palette index assigned to the first chain.
    pub palette_offset: usize,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            palette: ["7F1637", "047878", "FFB733", "F57336", "C22121"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            palette_offset: 2,
        }
    }
}

impl ColorOptions {
    /// Parse the hex palette into a [`ChainPalette`].
    ///
    /// # Errors
    ///
    /// Returns [`RibbonError::InvalidColor`] for the first entry that is not
    /// a valid hex color.
    pub fn chain_palette(&self) -> Result<ChainPalette, RibbonError> {
        let colors = self
            .palette
            .iter()
            .map(|hex| parse_hex_color(hex))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ChainPalette::new(colors, self.palette_offset))
    }
}

/// Colors cycled by chain index.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainPalette {
    colors: Vec<Color>,
    offset: usize,
}

impl ChainPalette {
    /// Palette starting at `offset` for chain 0.
    #[must_use]
    pub fn new(colors: Vec<Color>, offset: usize) -> Self {
        Self { colors, offset }
    }

    /// A palette that paints every chain the same color.
    #[must_use]
    pub fn uniform(color: Color) -> Self {
        Self::new(vec![color], 0)
    }

    /// Color for chain `index`; gray when the palette is empty.
    #[must_use]
    pub fn color_for(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return FALLBACK_COLOR;
        }
        self.colors[(index + self.offset) % self.colors.len()]
    }
}
