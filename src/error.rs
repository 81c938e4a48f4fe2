//! Error types shared by the conversion stages.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while converting a single icon or preview.
///
/// Every variant is per-item: the build pipeline records it against the item
/// being processed and moves on to the next one.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IconError {
    /// No `0xNN` byte literals were found inside the braces of the source text
    #[error("malformed source: no byte literals found between '{{' and '}}'")]
    MalformedSource,
    /// Pixel count is not a perfect square, so width/height cannot be inferred
    #[error("cannot determine square dimensions from {pixels} pixels")]
    AmbiguousDimensions { pixels: usize },
    /// Requested image dimensions are zero (or otherwise unusable)
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// The external rasterizer failed, timed out, or could not be found
    #[error("{tool}: {reason}")]
    ExternalToolFailure { tool: String, reason: String },
    /// A file could not be read or written
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// PNG preview encoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

impl IconError {
    /// Wrap an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IconError::Io { path: path.into(), source }
    }

    /// Build an external tool failure.
    pub fn tool(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        IconError::ExternalToolFailure { tool: tool.into(), reason: reason.into() }
    }
}

/// Result alias for conversion operations.
pub type Result<T> = std::result::Result<T, IconError>;
