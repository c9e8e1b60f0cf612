// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of SolarCast.

//! CLI module for the prediction command-line interface.

pub mod args;
pub mod commands;
pub mod formatters;

pub use args::{Cli, Commands, InteractiveArgs, OutputArgs, PredictArgs};
pub use commands::{resolve_config, run_config, run_interactive, run_predict, write_outputs};
pub use formatters::{TableFormatter, format_outcome};
