//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod catalog;
mod extract;
mod preview;
mod rasterize;

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::build::{BatchResult, ConsoleProgress, JsonProgress, ProgressReporter};
use crate::config::{default_config, find_config, load_config, IconsheetConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// iconsheet - Cut RGB565 icons out of a sprite sheet for LVGL firmware
#[derive(Parser)]
#[command(name = "iconsheet")]
#[command(about = "Cut RGB565 icons out of a sprite sheet and emit LVGL C sources with BMP previews")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every catalog icon from the sprite sheet
    Extract {
        /// Config file (default: iconsheet.toml found by walking up from the current directory)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (overrides project.out)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Sprite sheet source file (overrides sheet.source)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Icon side length in pixels (overrides output.size)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1024))]
        size: Option<u32>,

        /// Only extract the icon with this name
        #[arg(short, long)]
        icon: Option<String>,

        /// List the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,

        /// Skip the .bmp previews
        #[arg(long)]
        no_bmp: bool,

        /// Also write .png previews
        #[arg(long)]
        png: bool,

        /// Report progress and the result as JSON lines
        #[arg(long)]
        json: bool,

        /// Show each icon as it starts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a .bmp preview next to every emitted *_icon_*.c file
    Preview {
        /// Directory to scan (default: project.out)
        dir: Option<PathBuf>,

        /// Config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report progress and the result as JSON lines
        #[arg(long)]
        json: bool,

        /// Show each file as it starts
        #[arg(short, long)]
        verbose: bool,
    },

    /// Convert *.svg files to PNG with an external rasterizer
    Rasterize {
        /// Config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory holding the .svg files (overrides rasterize.input_dir)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory receiving the .png files (overrides rasterize.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export width and height in pixels (overrides rasterize.size)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=4096))]
        size: Option<u32>,

        /// Rasterizer executable (overrides rasterize.tool)
        #[arg(long)]
        tool: Option<String>,

        /// Per-file timeout in seconds (overrides rasterize.timeout_secs)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Report progress and the result as JSON lines
        #[arg(long)]
        json: bool,

        /// Show each file as it starts
        #[arg(short, long)]
        verbose: bool,
    },

    /// List catalog icons with their grid cells and pixel offsets
    Catalog {
        /// Config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            config,
            out,
            source,
            size,
            icon,
            dry_run,
            no_bmp,
            png,
            json,
            verbose,
        } => extract::run_extract(
            config.as_deref(),
            out.as_deref(),
            source.as_deref(),
            size,
            icon.as_deref(),
            dry_run,
            no_bmp,
            png,
            json,
            verbose,
        ),
        Commands::Preview { dir, config, json, verbose } => {
            preview::run_preview(dir.as_deref(), config.as_deref(), json, verbose)
        }
        Commands::Rasterize { config, input, output, size, tool, timeout, json, verbose } => {
            rasterize::run_rasterize(
                config.as_deref(),
                input.as_deref(),
                output.as_deref(),
                size,
                tool.as_deref(),
                timeout,
                json,
                verbose,
            )
        }
        Commands::Catalog { config, json } => catalog::run_catalog(config.as_deref(), json),
    }
}

/// Load the project configuration and the directory its relative paths
/// resolve against.
///
/// An explicit `config_path` must exist. Without one, `iconsheet.toml` is
/// searched for upwards from the working directory; if none is found the
/// built-in weather sheet defaults are used relative to the working directory.
pub(crate) fn load_project(
    config_path: Option<&Path>,
    verbose: bool,
) -> Result<(IconsheetConfig, PathBuf), ExitCode> {
    let cwd = std::env::current_dir().unwrap_or_default();

    let found = match config_path {
        Some(path) if !path.exists() => {
            eprintln!("Error: Config file not found: {}", path.display());
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }
        Some(path) => Some(path.to_path_buf()),
        None => find_config(),
    };

    match found {
        Some(path) => {
            if verbose {
                eprintln!("Using config: {}", path.display());
            }
            let config = load_config(Some(&path)).map_err(|e| {
                eprintln!("Error loading config: {}", e);
                ExitCode::from(EXIT_ERROR)
            })?;
            let root = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or(cwd);
            Ok((config, root))
        }
        None => {
            if verbose {
                eprintln!("No iconsheet.toml found, using defaults");
            }
            Ok((default_config(), cwd))
        }
    }
}

/// Progress reporter for the `--json` / `--verbose` flags.
pub(crate) fn reporter(json: bool, verbose: bool) -> Box<dyn ProgressReporter> {
    if json {
        Box::new(JsonProgress::new())
    } else {
        Box::new(ConsoleProgress::new().with_verbose(verbose))
    }
}

/// Machine-readable batch result.
pub(crate) fn result_json(result: &BatchResult) -> serde_json::Value {
    let items: Vec<serde_json::Value> = result
        .items
        .iter()
        .map(|item| {
            let outputs: Vec<String> =
                item.outputs.iter().map(|p| p.display().to_string()).collect();
            json!({
                "name": item.name,
                "status": item.status.to_string(),
                "outputs": outputs,
            })
        })
        .collect();

    json!({
        "success": result.is_success(),
        "total": result.total(),
        "succeeded": result.success_count(),
        "skipped": result.skipped_count(),
        "failed": result.failed_count(),
        "items": items,
    })
}

/// Print the final result to stdout: `headline` plus failures, or JSON.
pub(crate) fn print_result(result: &BatchResult, headline: &str, json: bool) {
    if json {
        println!("{}", result_json(result));
    } else {
        println!("{}", result.summary(headline));
    }
}
