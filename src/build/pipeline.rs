//! Icon extraction pipeline.
//!
//! For each catalog entry the pipeline crops the entry's cell out of the
//! sprite sheet, scales it to the icon size, writes the `.c`/`.h` pair and
//! then the optional previews. The BMP preview is decoded from the emitted
//! `.c` text, so it shows exactly what the firmware will embed.

use crate::bmp::save_bmp;
use crate::build::{BatchResult, BuildContext, ItemResult, ProgressEvent, ProgressReporter};
use crate::catalog::{GridCell, IconCatalog, SheetGeometry};
use crate::emit::{emit_c_source, emit_header};
use crate::error::IconError;
use crate::output::{save_png, write_file, IconOutputs};
use crate::pixels::PixelBuffer;
use crate::region::extract;
use crate::resample::resize_nearest;
use crate::source::{read_byte_array_file, read_square_icon};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Error that stops a whole batch before any item is processed.
#[derive(Debug)]
pub enum BuildError {
    /// `--icon` named an icon the catalog does not contain
    UnknownIcon(String),
    /// The sprite sheet could not be read
    Sheet(IconError),
    /// Input directory could not be scanned
    Discovery(crate::build::DiscoveryError),
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::UnknownIcon(name) => write!(f, "Unknown icon '{}'", name),
            BuildError::Sheet(e) => write!(f, "Cannot read sprite sheet: {}", e),
            BuildError::Discovery(e) => write!(f, "Discovery error: {}", e),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Sheet(e) => Some(e),
            BuildError::Discovery(e) => Some(e),
            BuildError::UnknownIcon(_) => None,
        }
    }
}

impl From<crate::build::DiscoveryError> for BuildError {
    fn from(e: crate::build::DiscoveryError) -> Self {
        BuildError::Discovery(e)
    }
}

/// Crop one grid cell out of the sheet and scale it to the icon size.
pub fn render_icon(sheet: &[u8], geometry: &SheetGeometry, cell: GridCell) -> PixelBuffer {
    let region = geometry.cell_region(cell);
    let cropped = extract(sheet, geometry.sheet_width, geometry.sheet_height, region);
    resize_nearest(&cropped, geometry.icon_size, geometry.icon_size)
}

/// Runs the catalog through extraction, emission and preview encoding.
pub struct IconPipeline<'a> {
    context: BuildContext,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> IconPipeline<'a> {
    pub fn new(context: BuildContext, reporter: &'a dyn ProgressReporter) -> Self {
        Self { context, reporter }
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Convert every catalog entry.
    ///
    /// Per-icon failures are recorded in the returned [`BatchResult`]. Only an
    /// unknown `--icon` filter or an unreadable sheet fails the whole run.
    pub fn run(&self) -> Result<BatchResult, BuildError> {
        let start = Instant::now();

        let catalog = match self.context.catalog() {
            Some(catalog) => catalog,
            None => {
                let name = self.context.icon_filter().unwrap_or_default().to_string();
                return Err(BuildError::UnknownIcon(name));
            }
        };

        let result = if self.context.is_dry_run() {
            self.plan(&catalog)
        } else {
            let source = self.context.source_path();
            let sheet = match read_byte_array_file(&source) {
                Ok(sheet) => sheet,
                Err(e) => {
                    let err = BuildError::Sheet(e);
                    self.reporter
                        .report(ProgressEvent::Error { item: None, message: err.to_string() });
                    return Err(err);
                }
            };
            self.check_sheet_size(&sheet);
            self.convert_all(&catalog, &sheet)
        };

        let result = result.with_duration(start.elapsed());
        self.reporter.report(ProgressEvent::batch_completed(&result));
        Ok(result)
    }

    fn convert_all(&self, catalog: &IconCatalog, sheet: &[u8]) -> BatchResult {
        let geometry = self.context.geometry();
        let out_dir = self.context.out_dir();
        let mut result = BatchResult::new();

        self.reporter.report(ProgressEvent::BatchStarted {
            label: "extract".to_string(),
            total: catalog.len(),
        });

        for entry in catalog.icons() {
            let item = match catalog.resolve(&entry.name) {
                Some(cell) => self.convert_icon(sheet, &geometry, cell, &entry.name, &out_dir),
                None => ItemResult::failed(
                    entry.name.clone(),
                    format!("unknown cell '{}'", entry.cell_key),
                    std::time::Duration::ZERO,
                ),
            };
            self.report_item(&item);
            result.add_result(item);
        }

        result
    }

    /// Dry run: list what would be written without touching the disk.
    fn plan(&self, catalog: &IconCatalog) -> BatchResult {
        let size = self.context.geometry().icon_size;
        let out_dir = self.context.out_dir();
        let mut result = BatchResult::new();

        self.reporter.report(ProgressEvent::BatchStarted {
            label: "extract (dry run)".to_string(),
            total: catalog.len(),
        });

        let source = self.context.source_path();
        if !source.exists() {
            self.reporter.report(ProgressEvent::Warning {
                item: None,
                message: format!("sprite sheet not found: {}", source.display()),
            });
        }

        for entry in catalog.icons() {
            let paths = IconOutputs::new(&out_dir, &entry.name, size);
            let item = ItemResult::skipped(entry.name.clone(), self.planned_outputs(&paths));
            self.report_item(&item);
            result.add_result(item);
        }

        result
    }

    fn convert_icon(
        &self,
        sheet: &[u8],
        geometry: &SheetGeometry,
        cell: GridCell,
        name: &str,
        out_dir: &Path,
    ) -> ItemResult {
        let start = Instant::now();
        self.reporter.report(ProgressEvent::ItemStarted { name: name.to_string() });

        match self.write_icon(sheet, geometry, cell, name, out_dir) {
            Ok(outputs) => ItemResult::success(name, outputs, start.elapsed()),
            Err(e) => ItemResult::failed(name, e.to_string(), start.elapsed()),
        }
    }

    fn write_icon(
        &self,
        sheet: &[u8],
        geometry: &SheetGeometry,
        cell: GridCell,
        name: &str,
        out_dir: &Path,
    ) -> crate::error::Result<Vec<PathBuf>> {
        let output = &self.context.config().output;
        let icon = render_icon(sheet, geometry, cell);
        let paths = IconOutputs::new(out_dir, name, geometry.icon_size);

        let source = emit_c_source(&icon, &paths.stem, output.pixels_per_line);
        write_file(&paths.source, source.as_bytes())?;
        write_file(&paths.header, emit_header(&paths.stem).as_bytes())?;
        let mut written = vec![paths.source.clone(), paths.header.clone()];

        if output.bmp {
            let preview = read_square_icon(&source)?;
            save_bmp(&preview, &paths.bmp)?;
            written.push(paths.bmp.clone());
        }

        if output.png {
            save_png(&icon, &paths.png)?;
            written.push(paths.png.clone());
        }

        Ok(written)
    }

    fn planned_outputs(&self, paths: &IconOutputs) -> Vec<PathBuf> {
        let output = &self.context.config().output;
        let mut planned = vec![paths.source.clone(), paths.header.clone()];
        if output.bmp {
            planned.push(paths.bmp.clone());
        }
        if output.png {
            planned.push(paths.png.clone());
        }
        planned
    }

    fn check_sheet_size(&self, sheet: &[u8]) {
        let geometry = self.context.geometry();
        let expected = geometry.sheet_width as u64 * geometry.sheet_height as u64 * 2;
        if sheet.len() as u64 != expected {
            self.reporter.report(ProgressEvent::Warning {
                item: None,
                message: format!(
                    "sprite sheet has {} bytes, expected {} for {}x{}",
                    sheet.len(),
                    expected,
                    geometry.sheet_width,
                    geometry.sheet_height
                ),
            });
        }
    }

    fn report_item(&self, item: &ItemResult) {
        self.reporter.report(ProgressEvent::ItemCompleted {
            name: item.name.clone(),
            status: item.status.clone(),
            duration_ms: item.duration.as_millis() as u64,
        });
    }
}
