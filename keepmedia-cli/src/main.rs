//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use keepmedia_cli::CliError;

fn main() {
    match keepmedia_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("keepmedia: {err}");
            std::process::exit(1);
        }
    }
}
