// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! The search starts at the application package (its directory, or the
//! directory holding a zip archive) and walks up until a `vespa.toml` is
//! found or a git root is passed.

use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Error, Result};

/// Directory where the search for the package at `package_path` begins.
pub fn search_start(package_path: &Path) -> &Path {
    let dir = if package_path.is_dir() {
        package_path
    } else {
        package_path.parent().unwrap_or(Path::new("."))
    };
    if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    }
}

/// Find `vespa.toml` in `start_dir` or one of its ancestors, up to and
/// including the first directory containing `.git`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Pick the config file for a deployment of `package_path`.
///
/// `explicit` comes from `-C`/`--config` or `VESPA_CLI_CONFIG` and must
/// exist. Without it the file is discovered, and `None` means defaults.
pub fn resolve_config(explicit: Option<&Path>, package_path: &Path) -> Result<Option<PathBuf>> {
    let Some(path) = explicit else {
        return Ok(find_config(search_start(package_path)));
    };
    if !path.exists() {
        return Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        });
    }
    Ok(Some(path.to_path_buf()))
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
