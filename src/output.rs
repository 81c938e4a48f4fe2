//! Output file writing and path generation

use std::path::{Path, PathBuf};

use crate::emit::c_identifier;
use crate::error::{IconError, Result};
use crate::pixels::PixelBuffer;

/// Write `bytes` to `path` in one call, creating parent directories first.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| IconError::io(parent, e))?;
        }
    }
    std::fs::write(path, bytes).map_err(|e| IconError::io(path, e))
}

/// Save an RGB565 buffer as a PNG preview.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| IconError::io(parent, e))?;
        }
    }
    buffer.to_rgb_image().save(path)?;
    Ok(())
}

/// Asset name for an icon: `{name}_icon_{size}` with the name made
/// identifier-safe.
///
/// ```
/// use iconsheet::output::icon_stem;
///
/// assert_eq!(icon_stem("snowy-rainy", 64), "snowy_rainy_icon_64");
/// ```
pub fn icon_stem(name: &str, size: u32) -> String {
    format!("{}_icon_{}", c_identifier(name), size)
}

/// Paths of every file produced for one icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconOutputs {
    /// C variable / file stem
    pub stem: String,
    pub source: PathBuf,
    pub header: PathBuf,
    pub bmp: PathBuf,
    pub png: PathBuf,
}

impl IconOutputs {
    /// Paths for icon `name` rendered at `size` inside `out_dir`.
    pub fn new(out_dir: &Path, name: &str, size: u32) -> Self {
        let stem = icon_stem(name, size);
        Self {
            source: out_dir.join(format!("{}.c", stem)),
            header: out_dir.join(format!("{}.h", stem)),
            bmp: out_dir.join(format!("{}.bmp", stem)),
            png: out_dir.join(format!("{}.png", stem)),
            stem,
        }
    }
}

/// Preview path for an emitted `.c` file (same stem, `.bmp` extension).
pub fn preview_path(source: &Path) -> PathBuf {
    source.with_extension("bmp")
}
