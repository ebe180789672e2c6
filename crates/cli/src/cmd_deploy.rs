// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `vespa deploy` command implementation.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use clap::Parser;

use crate::cli::{Cli, Command, DeployArgs};
use crate::color;
use crate::config::{self, Config};
use crate::deploy::{self, DeployOutcome};
use crate::discovery;
use crate::error::{Error, ExitCode, Result};
use crate::http::{HttpClient, UreqClient};
use crate::package::ApplicationPackage;
use crate::target::Target;

/// Load the config that applies to the package at `package_path`.
pub fn load_config(explicit: Option<&Path>, package_path: &Path) -> Result<Config> {
    match discovery::resolve_config(explicit, package_path)? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load(&path)
        }
        None => Ok(Config::default()),
    }
}

/// Deploy the package named by `args` through `client`.
pub fn deploy_with(
    args: &DeployArgs,
    config: &Config,
    client: &dyn HttpClient,
) -> Result<DeployOutcome> {
    let target = Target::resolve([args.target.as_deref(), config.target.as_deref()])?;
    tracing::debug!(target = %target, "resolved deploy target");

    let package = ApplicationPackage::find(&args.path)?;
    tracing::debug!(package = %package.path().display(), "resolved application package");
    let bytes = package.to_zip()?;

    deploy::deploy(client, &target, bytes)
}

/// Parse `argv` as a full command line, run the deploy command through
/// `client`, and return the exit code with the text destined for stdout.
pub fn execute<I, T>(argv: I, client: &dyn HttpClient) -> anyhow::Result<(ExitCode, String)>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(argv)?;
    let Some(Command::Deploy(args)) = &cli.command else {
        return Err(Error::Internal("expected the deploy command".to_string()).into());
    };

    let config = load_config(cli.config.as_deref(), &args.path)?;
    Ok(deploy_and_render(args, &config, client)?)
}

fn deploy_and_render(
    args: &DeployArgs,
    config: &Config,
    client: &dyn HttpClient,
) -> Result<(ExitCode, String)> {
    let use_color = color::enabled(color::resolve_color(args.color, args.no_color));
    let outcome = deploy_with(args, config, client)?;
    Ok((outcome.exit_code(), outcome.render(use_color)))
}

/// Run the deploy command over the network, printing the outcome to stdout.
pub fn run(cli: &Cli, args: &DeployArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(cli.config.as_deref(), &args.path)?;
    let client = UreqClient::new(&config.http);

    let (code, output) = deploy_and_render(args, &config, &client)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(code)
}

#[cfg(test)]
#[path = "cmd_deploy_tests.rs"]
mod tests;
