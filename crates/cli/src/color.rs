// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Detection order:
//! 1. `--no-color` / `--color` flags
//! 2. NO_COLOR env var → no color
//! 3. COLOR env var → use color
//! 4. default: color only if stdout is a TTY
//!
//! Styling is a pure string transformation so rendered output can be
//! compared byte-for-byte without a terminal.

use std::io::IsTerminal;

use termcolor::ColorChoice;

use crate::env::names;

/// ANSI SGR codes used for command output.
pub mod codes {
    /// Success: green foreground
    pub const GREEN: u8 = 32;
    /// Failure: red foreground
    pub const RED: u8 = 31;
}

fn fg(code: u8) -> String {
    format!("\x1b[{code}m")
}

/// Prefix `text` with the color code. No reset follows, so the color
/// runs to the end of the output.
fn paint(code: u8, text: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}", fg(code), text)
    } else {
        text.to_string()
    }
}

/// Style text as a success message (green).
pub fn success(text: &str, enabled: bool) -> String {
    paint(codes::GREEN, text, enabled)
}

/// Style text as a failure message (red).
pub fn failure(text: &str, enabled: bool) -> String {
    paint(codes::RED, text, enabled)
}

/// Resolve color choice from flags and environment variables.
///
/// Priority: flags > NO_COLOR > COLOR > auto-detect
///
/// Per [no-color.org](https://no-color.org/), `NO_COLOR` when set to any value
/// (including empty string) disables color.
pub fn resolve_color(force: bool, disable: bool) -> ColorChoice {
    if disable {
        return ColorChoice::Never;
    }
    if force {
        return ColorChoice::Always;
    }
    if std::env::var_os(names::NO_COLOR).is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os(names::COLOR).is_some() {
        return ColorChoice::Always;
    }
    ColorChoice::Auto
}

/// Whether output written to stdout should carry ANSI codes.
pub fn enabled(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always | ColorChoice::AlwaysAnsi => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
