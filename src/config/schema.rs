//! Configuration schema types for `iconsheet.toml`
//!
//! Defines the structure and validation rules for an icon conversion project.
//!
//! ```toml
//! [project]
//! name = "weather-station"
//! out = "src/ui/icons"
//!
//! [sheet]
//! source = "weathers.c"
//! width = 1920
//! height = 1178
//!
//! [output]
//! size = 64
//! png = true
//!
//! [cells]
//! sunny = [0, 2]
//! partlycloudy = [0, 0]
//!
//! [icons]
//! fog = "partlycloudy"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::catalog::{GridCell, IconCatalog, SheetGeometry};

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name
    #[serde(default = "default_name")]
    pub name: String,
    /// Directory receiving generated `.c`/`.h`/`.bmp` files
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self { name: default_name(), out: default_out() }
    }
}

fn default_name() -> String {
    "icons".to_string()
}

fn default_out() -> PathBuf {
    PathBuf::from("build/icons")
}

/// Sprite sheet source and layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Text file holding the sheet as a C byte array
    #[serde(default = "default_source")]
    pub source: PathBuf,
    #[serde(default = "default_sheet_width")]
    pub width: u32,
    #[serde(default = "default_sheet_height")]
    pub height: u32,
    /// Side length of one grid cell in pixels
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Pixel offset of cell (0, 0)
    #[serde(default = "default_origin_x")]
    pub origin_x: i64,
    #[serde(default = "default_origin_y")]
    pub origin_y: i64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            width: default_sheet_width(),
            height: default_sheet_height(),
            cell_size: default_cell_size(),
            origin_x: default_origin_x(),
            origin_y: default_origin_y(),
        }
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("weathers.c")
}

fn default_sheet_width() -> u32 {
    SheetGeometry::default().sheet_width
}

fn default_sheet_height() -> u32 {
    SheetGeometry::default().sheet_height
}

fn default_cell_size() -> u32 {
    SheetGeometry::default().cell_size
}

fn default_origin_x() -> i64 {
    SheetGeometry::default().origin_x
}

fn default_origin_y() -> i64 {
    SheetGeometry::default().origin_y
}

/// Generated asset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Side length of generated icons
    #[serde(default = "default_icon_size")]
    pub size: u32,
    /// Write a `.bmp` preview next to each icon
    #[serde(default = "default_true")]
    pub bmp: bool,
    /// Write a `.png` preview next to each icon
    #[serde(default)]
    pub png: bool,
    /// Pixels per line in the emitted byte array
    #[serde(default = "default_pixels_per_line")]
    pub pixels_per_line: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            size: default_icon_size(),
            bmp: true,
            png: false,
            pixels_per_line: default_pixels_per_line(),
        }
    }
}

fn default_icon_size() -> u32 {
    SheetGeometry::default().icon_size
}

fn default_true() -> bool {
    true
}

fn default_pixels_per_line() -> usize {
    crate::emit::DEFAULT_PIXELS_PER_LINE
}

/// External SVG rasterizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterizeConfig {
    /// Executable name or path
    #[serde(default = "default_tool")]
    pub tool: String,
    /// Directory scanned for `*.svg`
    #[serde(default = "default_svg_dir")]
    pub input_dir: PathBuf,
    /// Directory receiving `*.png`
    #[serde(default = "default_png_dir")]
    pub output_dir: PathBuf,
    /// Export width and height
    #[serde(default = "default_icon_size")]
    pub size: u32,
    /// Per-file timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Outputs at or below this size are treated as failures
    #[serde(default = "default_min_output_bytes")]
    pub min_output_bytes: u64,
}

impl Default for RasterizeConfig {
    fn default() -> Self {
        Self {
            tool: default_tool(),
            input_dir: default_svg_dir(),
            output_dir: default_png_dir(),
            size: default_icon_size(),
            timeout_secs: default_timeout_secs(),
            min_output_bytes: default_min_output_bytes(),
        }
    }
}

fn default_tool() -> String {
    "inkscape".to_string()
}

fn default_svg_dir() -> PathBuf {
    PathBuf::from("resources/icons")
}

fn default_png_dir() -> PathBuf {
    PathBuf::from("data/icons")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_min_output_bytes() -> u64 {
    200
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IconsheetConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Cell key -> `[row, col]`. Every cell is also an icon of the same name.
    /// Icons are extracted in key order, not in file order.
    #[serde(default)]
    pub cells: BTreeMap<String, [u32; 2]>,
    /// Extra icon name -> cell key. These come after every `[cells]` icon,
    /// again in key order.
    #[serde(default)]
    pub icons: BTreeMap<String, String>,
    #[serde(default)]
    pub rasterize: RasterizeConfig,
}

/// Configuration validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "output.size")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "iconsheet.toml: '{}' {}", self.field, self.message)
    }
}

impl IconsheetConfig {
    /// Sheet layout and icon size.
    pub fn geometry(&self) -> SheetGeometry {
        SheetGeometry {
            sheet_width: self.sheet.width,
            sheet_height: self.sheet.height,
            cell_size: self.sheet.cell_size,
            origin_x: self.sheet.origin_x,
            origin_y: self.sheet.origin_y,
            icon_size: self.output.size,
        }
    }

    /// Icon catalog. Falls back to the weather catalog when neither `[cells]`
    /// nor `[icons]` is present.
    ///
    /// Cell icons come first sorted by key, then aliases sorted by name.
    pub fn catalog(&self) -> IconCatalog {
        if self.cells.is_empty() && self.icons.is_empty() {
            return IconCatalog::weather();
        }

        let mut catalog = IconCatalog::new();
        for (key, [row, col]) in &self.cells {
            catalog = catalog.with_icon(key, GridCell::new(*row, *col));
        }
        for (name, key) in &self.icons {
            catalog = catalog.with_alias(name, key);
        }
        catalog
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut positive = |field: &str, value: u64| {
            if value == 0 {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        };

        positive("sheet.width", self.sheet.width as u64);
        positive("sheet.height", self.sheet.height as u64);
        positive("sheet.cell_size", self.sheet.cell_size as u64);
        positive("output.size", self.output.size as u64);
        positive("output.pixels_per_line", self.output.pixels_per_line as u64);
        positive("rasterize.size", self.rasterize.size as u64);
        positive("rasterize.timeout_secs", self.rasterize.timeout_secs);

        if self.project.name.is_empty() {
            errors.push(ConfigValidationError {
                field: "project.name".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        for issue in self.catalog().validate() {
            errors.push(ConfigValidationError {
                field: "icons".to_string(),
                message: issue.to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
