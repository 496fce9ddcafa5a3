//! Crate-level error types.

use std::fmt;

/// Errors produced by the ribbon crate.
#[derive(Debug)]
pub enum RibbonError {
    /// Failed to load or interpret a molecular structure file.
    StructureLoad(String),
    /// A chain has fewer than two backbone positions and cannot be swept.
    InsufficientControlPoints {
        /// Identifier of the offending chain.
        chain: String,
        /// Number of backbone positions the chain provided.
        found: usize,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Options parsed but hold values the pipeline cannot use.
    InvalidOptions(String),
    /// A palette entry is not a valid hex color.
    InvalidColor(String),
}

impl fmt::Display for RibbonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructureLoad(msg) => {
                write!(f, "structure load error: {msg}")
            }
            Self::InsufficientControlPoints { chain, found } => write!(
                f,
                "chain '{chain}' has {found} backbone position(s), at least \
                 2 are required"
            ),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidOptions(msg) => write!(f, "invalid options: {msg}"),
            Self::InvalidColor(value) => {
                write!(f, "invalid hex color: '{value}'")
            }
        }
    }
}

impl std::error::Error for RibbonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RibbonError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
