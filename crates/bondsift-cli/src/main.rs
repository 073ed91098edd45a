mod cli;
mod commands;
mod error;
mod metadata;
mod output;
mod session_file;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            match &error {
                CliError::Screen(screen) => {
                    eprintln!("error[{}]: {screen}", screen.code());
                    eprintln!("hint: {}", screen.user_hint());
                }
                other => eprintln!("error: {other}"),
            }
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();

    let report = commands::run(&cli).await?;
    output::render(&report, cli.format, cli.pretty)?;

    Ok(ExitCode::SUCCESS)
}
