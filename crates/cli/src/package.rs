// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Application package resolution and zip packaging.
//!
//! A package is either a directory, which is zipped in memory, or a
//! pre-built `.zip` archive, which is sent as-is.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::archive::ZipStream;
use crate::error::{Error, Result};

/// An application package on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationPackage {
    /// Application directory, zipped before upload.
    Directory(PathBuf),
    /// Pre-built zip archive, uploaded unchanged.
    Zip(PathBuf),
}

impl ApplicationPackage {
    /// Classify `path` as a package directory or zip archive.
    pub fn find(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::Argument(format!(
                "application package not found: {}",
                path.display()
            )),
            _ => Error::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        if metadata.is_dir() {
            return Ok(Self::Directory(path.to_path_buf()));
        }
        if metadata.is_file() && has_zip_extension(path) {
            return Ok(Self::Zip(path.to_path_buf()));
        }
        Err(Error::Argument(format!(
            "application package must be a directory or a .zip file: {}",
            path.display()
        )))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Zip(path) => path,
        }
    }

    /// Bytes of the package as a zip archive.
    pub fn to_zip(&self) -> Result<Vec<u8>> {
        match self {
            Self::Directory(dir) => zip_directory(dir),
            Self::Zip(path) => {
                let bytes = std::fs::read(path).map_err(|e| Error::Io {
                    path: path.clone(),
                    source: e,
                })?;
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "read zip package");
                Ok(bytes)
            }
        }
    }
}

fn has_zip_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Zip every regular file below `dir` into an in-memory archive.
///
/// Entries are added in sorted path order with a fixed timestamp, so the
/// same tree always yields the same bytes. Hidden files are included and
/// ignore files are not honored; symlinks are not followed. A directory
/// without any regular file is rejected.
pub fn zip_directory(dir: &Path) -> Result<Vec<u8>> {
    let package_error = |message: String| Error::Package {
        path: dir.to_path_buf(),
        message,
    };

    let mut zip = ZipStream::new();

    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = entry.map_err(|e| package_error(e.to_string()))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let path = entry.path();
        let name = entry_name(dir, path).ok_or_else(|| {
            package_error(format!("cannot name entry {}", path.display()))
        })?;

        let file = File::open(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        zip.add_file(&name, file).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::trace!(entry = %name, "added package entry");
    }

    if zip.is_empty() {
        return Err(package_error("no files to deploy".to_string()));
    }
    let entries = zip.len();

    let bytes = zip.finish().map_err(|e| package_error(e.to_string()))?;

    tracing::debug!(
        dir = %dir.display(),
        entries,
        bytes = bytes.len(),
        "zipped application directory"
    );
    Ok(bytes)
}

/// Archive name of `path`: relative to `root`, `/`-separated.
fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?;
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

#[cfg(test)]
#[path = "package_tests.rs"]
mod tests;
