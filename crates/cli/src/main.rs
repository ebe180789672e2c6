// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! vespa CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use vespa_cli::cli::{Cli, Command};
use vespa_cli::cmd_deploy;
use vespa_cli::error::ExitCode;

fn init_logging() {
    let filter = EnvFilter::try_from_env(vespa_cli::env::log_var())
        .unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("vespa: {}", e);
            match e.downcast_ref::<vespa_cli::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Deploy(args)) => cmd_deploy::run(&cli, args),
    }
}
