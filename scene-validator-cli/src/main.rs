// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: CLI tools are expected to print to stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stderr, clippy::exit)]

use clap::Parser;
use scene_validator_cli::cli::{self, Cli};
use scene_validator_cli::logging;

fn main() {
    let args = Cli::parse();
    logging::init(args.verbose);

    match cli::run(&args) {
        Ok(result) => std::process::exit(cli::exit_code(&result)),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
