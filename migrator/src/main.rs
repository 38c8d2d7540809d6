use clap::Parser;
use log::{error, info};

pub mod args;
pub mod error;
pub mod process;

use args::{Cli, Commands};
use error::MigratorError;

fn main() -> Result<(), MigratorError> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Normalize { input, output } => {
            info!("Normalizing documents in '{}'...", input.display());
            let summary = process::normalize(input, output.as_deref())?;
            if !summary.all_ok() {
                error!(
                    "{} of {} documents failed to normalize",
                    summary.failed, summary.total
                );
                return Err(MigratorError::FailedLines {
                    path: input.clone(),
                    failed: summary.failed,
                    total: summary.total,
                });
            }
            info!("Normalized {} documents", summary.total);
        }
        Commands::Check { input, strict } => {
            info!("Checking documents in '{}'...", input.display());
            let summary = process::check(input, *strict)?;
            if !summary.all_ok() {
                error!("{} of {} documents are invalid", summary.failed, summary.total);
                return Err(MigratorError::FailedLines {
                    path: input.clone(),
                    failed: summary.failed,
                    total: summary.total,
                });
            }
            info!("All {} documents are valid", summary.total);
        }
    }

    Ok(())
}
