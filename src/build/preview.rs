//! BMP previews for previously emitted icon sources.

use crate::bmp::save_bmp;
use crate::build::discovery::{file_label, find_icon_sources};
use crate::build::{BatchResult, BuildError, ItemResult, ProgressEvent, ProgressReporter};
use crate::error::{IconError, Result};
use crate::output::preview_path;
use crate::source::read_square_icon;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Decode one emitted `.c` file and write its `.bmp` next to it.
///
/// The image is assumed square; its side is inferred from the pixel count.
pub fn convert_preview(source: &Path) -> Result<PathBuf> {
    let text = std::fs::read_to_string(source).map_err(|e| IconError::io(source, e))?;
    let buffer = read_square_icon(&text)?;
    let target = preview_path(source);
    save_bmp(&buffer, &target)?;
    Ok(target)
}

/// Convert every `*_icon_*.c` file in `dir`, in name order.
pub fn convert_previews(
    dir: &Path,
    reporter: &dyn ProgressReporter,
) -> std::result::Result<BatchResult, BuildError> {
    let start = Instant::now();
    let sources = find_icon_sources(dir)?;
    let mut result = BatchResult::new();

    reporter.report(ProgressEvent::BatchStarted {
        label: "preview".to_string(),
        total: sources.len(),
    });

    for source in &sources {
        let name = file_label(source);
        let item_start = Instant::now();
        reporter.report(ProgressEvent::ItemStarted { name: name.clone() });

        let item = match convert_preview(source) {
            Ok(bmp) => ItemResult::success(name, vec![bmp], item_start.elapsed()),
            Err(e) => ItemResult::failed(name, e.to_string(), item_start.elapsed()),
        };

        reporter.report(ProgressEvent::ItemCompleted {
            name: item.name.clone(),
            status: item.status.clone(),
            duration_ms: item.duration.as_millis() as u64,
        });
        result.add_result(item);
    }

    let result = result.with_duration(start.elapsed());
    reporter.report(ProgressEvent::batch_completed(&result));
    Ok(result)
}
