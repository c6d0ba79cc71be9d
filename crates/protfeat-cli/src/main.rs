mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::config::{CliOverrides, build_config};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\nError: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("protfeat CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let overrides = match &cli.command {
        Commands::Secondary(args) => CliOverrides {
            dssp_executable: args.dssp.clone(),
            ..CliOverrides::default()
        },
        Commands::NullModel(args) => CliOverrides {
            null_model_samples: args.samples,
            ..CliOverrides::default()
        },
        Commands::MicroEnv(_) => CliOverrides::default(),
    };
    let config = build_config(cli.config.as_deref(), &cli.set_values, &overrides)?;
    debug!("Resolved configuration: {:?}", &config);

    let progress = if cli.quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };

    let command_result = match &cli.command {
        Commands::MicroEnv(args) => {
            info!("Dispatching to 'micro-env' command.");
            commands::micro_env::run(args, &config, &progress).map(|summary| {
                info!(
                    "{} feature(s) from {} file(s), {} file(s) skipped.",
                    summary.features, summary.files, summary.failed_files
                );
            })
        }
        Commands::Secondary(args) => {
            info!("Dispatching to 'secondary' command.");
            commands::secondary::run(args, &config, &progress).map(|summary| {
                info!(
                    "{} segment(s), {} sheet(s) from {} file(s), {} file(s) skipped.",
                    summary.segments, summary.sheets, summary.files, summary.failed_files
                );
            })
        }
        Commands::NullModel(args) => {
            info!("Dispatching to 'null-model' command.");
            commands::null_model::run(args, &config, &progress).map(|path| {
                info!("Null-model features written to {:?}.", path);
            })
        }
    };

    if let Err(e) = &command_result {
        error!("Command failed: {}", e);
    } else {
        info!("Command completed successfully.");
    }
    command_result
}
