// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Package application directories and deploy them to a deploy service.

pub mod archive;
pub mod cli;
pub mod cmd_deploy;
pub mod color;
pub mod config;
pub mod deploy;
pub mod discovery;
pub mod env;
pub mod error;
pub mod http;
pub mod package;
pub mod target;

pub use cli::{Cli, Command, DeployArgs};
pub use config::Config;
pub use deploy::DeployOutcome;
pub use error::{Error, ExitCode, Result};
pub use http::{HttpClient, HttpRequest, HttpResponse, UreqClient};
pub use package::ApplicationPackage;
pub use target::Target;
