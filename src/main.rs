//! iconsheet - Command-line tool for extracting firmware icons from a sprite sheet

use std::process::ExitCode;

use iconsheet::cli;

fn main() -> ExitCode {
    cli::run()
}
