mod cli;
mod config;
mod report;
mod run;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crate::cli::Cli;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve()?;

    let _logger = common::log_setup::setup_logging(&config.log_level, config.log_dir.as_deref())
        .context("Failed to initialize logging")?;

    let settings = config.validate()?;
    log::debug!("{:?}", settings);

    let report = run::execute(&settings)?;
    print!("{}", report);

    Ok(())
}
