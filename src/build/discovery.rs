//! Input file discovery.
//!
//! Finds previously emitted icon sources (for BMP previews) and vector
//! sources (for the rasterizer) with glob patterns.

use glob::glob;
use std::path::{Path, PathBuf};

/// Pattern matching emitted icon sources, e.g. `sunny_icon_64.c`.
pub const ICON_SOURCE_PATTERN: &str = "*_icon_*.c";

/// Pattern matching vector inputs for the rasterizer.
pub const SVG_PATTERN: &str = "*.svg";

/// Error during discovery.
#[derive(Debug)]
pub enum DiscoveryError {
    /// Invalid glob pattern
    InvalidPattern(String, glob::PatternError),
    /// Directory to scan does not exist
    MissingDirectory(PathBuf),
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryError::InvalidPattern(pattern, err) => {
                write!(f, "Invalid glob pattern '{}': {}", pattern, err)
            }
            DiscoveryError::MissingDirectory(dir) => {
                write!(f, "Directory not found: {}", dir.display())
            }
        }
    }
}

impl std::error::Error for DiscoveryError {}

/// Files directly inside `dir` matching `pattern`, sorted by path.
pub fn discover_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !dir.is_dir() {
        return Err(DiscoveryError::MissingDirectory(dir.to_path_buf()));
    }

    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full_pattern = format!("{}/{}", escaped, pattern);
    let paths =
        glob(&full_pattern).map_err(|e| DiscoveryError::InvalidPattern(pattern.to_string(), e))?;

    let mut files: Vec<PathBuf> =
        paths.filter_map(Result::ok).filter(|path| path.is_file()).collect();
    files.sort();
    Ok(files)
}

/// Emitted icon `.c` files in `dir`.
pub fn find_icon_sources(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    discover_files(dir, ICON_SOURCE_PATTERN)
}

/// `.svg` files in `dir`.
pub fn find_svg_files(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    discover_files(dir, SVG_PATTERN)
}

/// Display name for a discovered file.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
