// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::env::names;

/// Package and deploy applications to a deploy service
#[derive(Parser)]
#[command(name = "vespa")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = names::VESPA_CLI_CONFIG)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy an application package directory or zip file
    Deploy(DeployArgs),
}

#[derive(clap::Args)]
pub struct DeployArgs {
    /// Application package directory or .zip file
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Deploy target: a URL or `local`
    #[arg(short = 't', long, value_name = "TARGET", env = names::VESPA_CLI_TARGET)]
    pub target: Option<String>,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
