//! Rasterize command implementation

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use crate::config::resolve_path;
use crate::rasterize::{rasterize_all, InkscapeRasterizer, Rasterizer};

use super::{load_project, print_result, reporter, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Run the rasterize command.
///
/// Succeeds when at least one file was converted.
pub fn run_rasterize(
    config_path: Option<&Path>,
    input: Option<&Path>,
    output: Option<&Path>,
    size: Option<u32>,
    tool: Option<&str>,
    timeout: Option<u64>,
    json: bool,
    verbose: bool,
) -> ExitCode {
    let (config, project_root) = match load_project(config_path, verbose) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let settings = &config.rasterize;

    let input_dir = resolve_path(&project_root, input.unwrap_or(settings.input_dir.as_path()));
    let output_dir = resolve_path(&project_root, output.unwrap_or(settings.output_dir.as_path()));
    let size = size.unwrap_or(settings.size);
    let timeout = Duration::from_secs(timeout.unwrap_or(settings.timeout_secs));
    let tool = tool.unwrap_or(settings.tool.as_str());

    let rasterizer = match InkscapeRasterizer::locate(tool, timeout) {
        Ok(rasterizer) => rasterizer,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Install it or point --tool at the executable");
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if verbose {
        eprintln!("Using {}: {}", rasterizer.name(), rasterizer.program().display());
    }

    let progress = reporter(json, verbose);
    let result = match rasterize_all(
        &rasterizer,
        &input_dir,
        &output_dir,
        size,
        settings.min_output_bytes,
        progress.as_ref(),
    ) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if result.total() == 0 {
        eprintln!("No SVG files found in {}", input_dir.display());
        return ExitCode::from(EXIT_ERROR);
    }

    let headline = format!("Successfully converted {} files", result.tally());
    print_result(&result, &headline, json);
    if result.any_success() {
        if !json {
            println!("PNG files are in: {}", output_dir.display());
        }
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}
