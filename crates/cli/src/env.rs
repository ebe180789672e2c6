// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Environment variables read by vespa-cli.

/// Environment variable names.
pub mod names {
    /// Disables color output (any value).
    pub const NO_COLOR: &str = "NO_COLOR";
    /// Forces color output (any value).
    pub const COLOR: &str = "COLOR";
    /// Configures the tracing log filter.
    pub const VESPA_LOG: &str = "VESPA_LOG";
    /// Path to an explicit config file (same as `-C`).
    pub const VESPA_CLI_CONFIG: &str = "VESPA_CLI_CONFIG";
    /// Deploy target used when `-t` is not given.
    pub const VESPA_CLI_TARGET: &str = "VESPA_CLI_TARGET";
}

/// Name of the env var holding the tracing filter.
pub fn log_var() -> &'static str {
    names::VESPA_LOG
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
