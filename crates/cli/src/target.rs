// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deploy target resolution.
//!
//! A target is the base URL of the deploy service. `local` (or no target at
//! all) means the config server on this machine.

use std::fmt;

use url::Url;

use crate::error::{Error, Result};

/// Base URL of a config server running on this machine.
pub const LOCAL_TARGET: &str = "http://127.0.0.1:19071";

/// `host:port` of [`LOCAL_TARGET`].
const LOCAL_AUTHORITY: &str = "127.0.0.1:19071";

/// Keyword accepted by `-t` for the local target.
pub const LOCAL_KEYWORD: &str = "local";

/// Resolved deploy target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    base: String,
    authority: String,
}

impl Target {
    /// The local default target.
    pub fn local() -> Self {
        Self {
            base: LOCAL_TARGET.to_string(),
            authority: LOCAL_AUTHORITY.to_string(),
        }
    }

    /// Resolve a target from the first value that is set, else the local default.
    ///
    /// Candidates are ordered by priority (e.g. `-t` / env, then config).
    pub fn resolve<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Result<Self> {
        let chosen = candidates
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty());

        match chosen {
            None => Ok(Self::local()),
            Some(value) if value == LOCAL_KEYWORD => Ok(Self::local()),
            Some(value) => Self::parse(value),
        }
    }

    /// Parse a literal target URL.
    pub fn parse(value: &str) -> Result<Self> {
        let base = value.strip_suffix('/').unwrap_or(value).to_string();
        let url = Url::parse(&base)
            .map_err(|e| Error::Argument(format!("invalid target `{value}`: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Argument(format!(
                "invalid target `{value}`: scheme must be http or https"
            )));
        }
        let Some(host) = url.host_str() else {
            return Err(Error::Argument(format!(
                "invalid target `{value}`: missing host"
            )));
        };
        let authority = match url.port_or_known_default() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self { base, authority })
    }

    /// Base URL as given, without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// `host:port` of the target, with the scheme's default port filled in.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Full URL of an endpoint below this target.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
