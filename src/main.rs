// src/main.rs

use std::process::ExitCode;

use wavedag::{cli, logging, run};

/// Exit code 0 whenever the run completes, even if some tasks failed;
/// 1 on any fatal error.
#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    let result = match logging::init_logging(args.log_level) {
        Ok(()) => run(args).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("wavedag error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
