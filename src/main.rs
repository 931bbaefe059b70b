//! envboot — writes `.env` from `.env.sample` and a key-pair file.
//!
//! Startup sequence:
//!   1. Parse flags
//!   2. Load config
//!   3. Init logger at configured level
//!   4. Resolve the secret and write the env file
//!   5. Print the report and exit

mod cli;

use std::io;

use clap::Parser;
use tracing::info;

use envboot::{bootstrap, config, error::AppError, logger};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = cli::CliArgs::parse();

    let config = config::load(args.config.as_deref(), args.overrides())?;

    logger::init(&config.log_level)?;

    info!(
        key_file = %config.key_file.display(),
        template = %config.template.display(),
        output = %config.output.display(),
        mode = %config.write_mode,
        "config loaded"
    );

    let override_value = config::read_override(&config.override_var)?;
    let report = bootstrap::run(&config, override_value.as_deref())?;

    report.render(&mut io::stdout().lock())?;
    Ok(())
}
