//! Postbox config directory
//!
//! All on-disk settings live as JSON files in one directory, normally
//! ~/.config/postbox/. [`ConfigDir`] wraps that directory so callers (and
//! tests) can point it anywhere.
//!
//! Call [`init`] at application startup to bootstrap the user's directory.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Name of the directory created under the platform config directory
const APP_DIR: &str = "postbox";

/// A directory holding Postbox JSON config files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    /// The current user's Postbox directory, e.g. ~/.config/postbox/
    pub fn user() -> Result<Self> {
        let base = dirs::config_dir().context("Could not determine config directory")?;
        Ok(Self::at(base.join(APP_DIR)))
    }

    /// Use an explicit directory
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a file inside this directory; the file need not exist
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create the directory (and parents) if missing
    pub fn ensure(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create config directory: {}", self.root.display()))?;
        Ok(&self.root)
    }

    /// Parse `name` as JSON. A missing file is `Ok(None)`; an unreadable or
    /// malformed one is an error.
    pub fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.file(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => parse_json(&content, &path).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read config file: {}", path.display())),
        }
    }
}

/// Bootstrap the user's config directory
pub fn init() -> Result<ConfigDir> {
    let dir = ConfigDir::user()?;
    dir.ensure()?;
    Ok(dir)
}

/// Parse a JSON file at an arbitrary path; the file must exist
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_json(&content, path)
}

fn parse_json<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T> {
    serde_json::from_str(content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
