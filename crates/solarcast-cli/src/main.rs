// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of SolarCast.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! SolarCast - Entry point for the prediction CLI

use anyhow::Result;
use clap::Parser;
use solarcast_cli::cli::{
    Cli, Commands, resolve_config, run_config, run_interactive, run_predict,
};
use solarcast_core::{PredictionClient, PredictionSession};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn,solarcast=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr, stdout carries the results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Predict(args) => {
            let mut session = PredictionSession::new(PredictionClient::new(&config)?);
            run_predict(&mut session, &args.radiation, &args.output, &mut stdout).await
        }
        Commands::Interactive(args) => {
            info!("Starting interactive session against {}", config.base_url);
            let mut session = PredictionSession::new(PredictionClient::new(&config)?);
            let input = BufReader::new(tokio::io::stdin());
            run_interactive(&mut session, input, &args.output, &mut stdout).await
        }
        Commands::Config => run_config(&config, &mut stdout),
    }
}
