use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use um::cli;

/// Execute a 32-bit Universal Machine program.
#[derive(Debug, Parser)]
#[command(name = "um")]
struct Args {
    /// Path to a .um binary to run.
    program: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match cli::run_file(&args.program) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("um: {err}");
            ExitCode::FAILURE
        }
    }
}
