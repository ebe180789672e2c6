// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles vespa.toml parsing with version validation and unknown key warnings.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Config file name looked up during discovery.
pub const CONFIG_FILE_NAME: &str = "vespa.toml";

/// Raw file contents, with unknown keys captured for warnings.
#[derive(Deserialize)]
struct RawConfig {
    version: Option<i64>,

    #[serde(default)]
    target: Option<String>,

    #[serde(default)]
    http: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Default)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Deploy target used when neither `-t` nor `VESPA_CLI_TARGET` is given.
    pub target: Option<String>,

    pub http: HttpConfig,
}

/// HTTP client timeouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn from_table(table: &toml::Table, path: &Path) -> Result<Self> {
        for key in table.keys() {
            if !KNOWN_HTTP_KEYS.contains(&key.as_str()) {
                warn_unknown_key(path, &format!("http.{key}"));
            }
        }

        let seconds = |key: &str, default: u64| -> Result<u64> {
            match table.get(key) {
                None => Ok(default),
                Some(value) => value
                    .as_integer()
                    .and_then(|n| u64::try_from(n).ok())
                    .ok_or_else(|| {
                        config_error(path, format!("http.{key} must be a non-negative integer"))
                    }),
            }
        };

        Ok(Self {
            connect_timeout_secs: seconds("connect_timeout_secs", DEFAULT_CONNECT_TIMEOUT_SECS)?,
            timeout_secs: seconds("timeout_secs", DEFAULT_TIMEOUT_SECS)?,
        })
    }
}

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Known http keys in the config.
const KNOWN_HTTP_KEYS: &[&str] = &["connect_timeout_secs", "timeout_secs"];

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

fn config_error(path: &Path, message: impl Into<String>) -> Error {
    Error::Config {
        message: message.into(),
        path: Some(path.to_path_buf()),
    }
}

/// Parse config from string content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| config_error(path, e.to_string()))?;

    let version = raw
        .version
        .ok_or_else(|| config_error(path, "missing required field: version"))?;
    check_version(version, path)?;

    for key in raw.unknown.keys() {
        warn_unknown_key(path, key);
    }

    let http = match raw.http {
        Some(toml::Value::Table(table)) => HttpConfig::from_table(&table, path)?,
        Some(_) => return Err(config_error(path, "http must be a table")),
        None => HttpConfig::default(),
    };

    Ok(Config {
        version,
        target: raw.target,
        http,
    })
}

fn check_version(version: i64, path: &Path) -> Result<()> {
    if version != SUPPORTED_VERSION {
        return Err(config_error(
            path,
            format!(
                "unsupported config version {} (supported: {})",
                version, SUPPORTED_VERSION
            ),
        ));
    }
    Ok(())
}

fn warn_unknown_key(path: &Path, key: &str) {
    tracing::debug!(key, "ignoring unknown config key");
    eprintln!(
        "vespa: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
