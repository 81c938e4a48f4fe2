//! Extract command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::build::{BuildContext, BuildError, IconPipeline};
use crate::config::{merge_cli_overrides, CliOverrides};

use super::{load_project, print_result, reporter, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Run the extract command
pub fn run_extract(
    config_path: Option<&Path>,
    out: Option<&Path>,
    source: Option<&Path>,
    size: Option<u32>,
    icon: Option<&str>,
    dry_run: bool,
    no_bmp: bool,
    png: bool,
    json: bool,
    verbose: bool,
) -> ExitCode {
    let (mut config, project_root) = match load_project(config_path, verbose) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let overrides = CliOverrides {
        out: out.map(Path::to_path_buf),
        source: source.map(Path::to_path_buf),
        size,
        bmp: if no_bmp { Some(false) } else { None },
        png: if png { Some(true) } else { None },
    };
    merge_cli_overrides(&mut config, &overrides);

    let mut context = BuildContext::new(config, project_root).with_dry_run(dry_run);
    if let Some(name) = icon {
        context = context.with_filter(name);
    }

    let progress = reporter(json, verbose);
    let pipeline = IconPipeline::new(context, progress.as_ref());

    match pipeline.run() {
        Ok(result) => {
            if dry_run && !json {
                println!("Dry run - would write:");
                for item in &result.items {
                    println!("  {}", item.name);
                    for path in &item.outputs {
                        println!("    - {}", path.display());
                    }
                }
                println!("{} icons planned", result.total());
                return ExitCode::from(EXIT_SUCCESS);
            }

            let headline = format!("Extracted {} icons", result.tally());
            print_result(&result, &headline, json);
            if result.is_success() {
                ExitCode::from(EXIT_SUCCESS)
            } else {
                ExitCode::from(EXIT_ERROR)
            }
        }
        Err(e @ BuildError::UnknownIcon(_)) => {
            eprintln!("Error: {}", e);
            let catalog = pipeline.context().config().catalog();
            let names: Vec<&str> = catalog.icons().iter().map(|e| e.name.as_str()).collect();
            eprintln!("Available icons: {}", names.join(", "));
            ExitCode::from(EXIT_INVALID_ARGS)
        }
        // Already reported through the progress reporter.
        Err(BuildError::Sheet(_)) => ExitCode::from(EXIT_INVALID_ARGS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        }
    }
}
