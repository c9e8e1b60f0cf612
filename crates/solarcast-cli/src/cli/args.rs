// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of SolarCast.

//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solarcast")]
#[command(author, version, about = "Solar power output predictions from radiation readings")]
#[command(
    long_about = "Send solar radiation readings (W/m²) to a prediction service and show the\n\
    predicted power output (kW), plus the history of the current session.\n\
    \nThe service address comes from --api-url, then SOLARCAST_API_URL, then the\n\
    config file, then http://localhost:8081.\n\
    \nExamples:\n  \
    solarcast predict 850                       # One prediction\n  \
    solarcast predict 500 900 --chart out.svg   # Several, with a chart\n  \
    solarcast interactive                       # Read values from stdin"
)]
pub struct Cli {
    /// Base URL of the prediction service
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds (requests wait indefinitely by default)
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict power output for one or more radiation readings
    #[command(
        long_about = "Submit each reading in order, one request at a time.\n\
        \nExits with an error if any prediction failed.\n\
        \nExamples:\n  \
        solarcast predict 850\n  \
        solarcast predict 500 900 1200 --export history.json"
    )]
    Predict(PredictArgs),

    /// Read radiation readings from stdin, one per line
    #[command(
        long_about = "Interactive session. Each line is submitted as a reading.\n\
        \nCommands:\n  \
        history   print the session history\n  \
        quit      end the session (also: exit, EOF)"
    )]
    Interactive(InteractiveArgs),

    /// Print the resolved configuration as TOML
    Config,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Radiation readings in W/m²
    #[arg(required = true, allow_negative_numbers = true, value_name = "RADIATION")]
    pub radiation: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct InteractiveArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Files written once the session ends
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Write the history line chart as SVG
    #[arg(long, value_name = "PATH")]
    pub chart: Option<PathBuf>,

    /// Write the history as JSON
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}
