//! Preview command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::build::convert_previews;
use crate::config::resolve_path;

use super::{load_project, print_result, reporter, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Run the preview command
pub fn run_preview(
    dir: Option<&Path>,
    config_path: Option<&Path>,
    json: bool,
    verbose: bool,
) -> ExitCode {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => match load_project(config_path, verbose) {
            Ok((config, root)) => resolve_path(&root, &config.project.out),
            Err(code) => return code,
        },
    };

    let progress = reporter(json, verbose);
    let result = match convert_previews(&dir, progress.as_ref()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    if result.total() == 0 {
        eprintln!("No *_icon_*.c files found in {}", dir.display());
        return ExitCode::from(EXIT_ERROR);
    }

    print_result(&result, &format!("Converted {}", result.tally()), json);
    if result.is_success() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}
