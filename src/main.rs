//! Shelf Matrix - shelf grid inventory from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = shelf_matrix::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
