//! Service configuration
//!
//! Resolves the mail service address and request policy once at startup.
//! The base address comes from (in order of priority):
//! 1. The `POSTBOX_API_URL` environment variable
//! 2. `api_url` in ~/.config/postbox/postbox.json
//! 3. The `POSTBOX_ENV` flag (`docker` selects the in-network address,
//!    anything else the local default)

use anyhow::{Context, Result};
use config::ConfigDir;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::mailbox::ResponseOrdering;

/// Config filename in the Postbox config directory
const CONFIG_FILE: &str = "postbox.json";

const API_URL_VAR: &str = "POSTBOX_API_URL";
const ENV_FLAG_VAR: &str = "POSTBOX_ENV";

/// Address of a service running on this machine
pub const LOCAL_API_URL: &str = "http://localhost:8080";
/// Address of the service inside the compose network
pub const DOCKER_API_URL: &str = "http://backend:8080";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Deployment environment selected by `POSTBOX_ENV`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Docker,
}

impl Environment {
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(value) if value.eq_ignore_ascii_case("docker") => Environment::Docker,
            _ => Environment::Local,
        }
    }

    pub fn api_url(self) -> &'static str {
        match self {
            Environment::Local => LOCAL_API_URL,
            Environment::Docker => DOCKER_API_URL,
        }
    }
}

/// On-disk config format; every field is optional
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub ordering: Option<ResponseOrdering>,
}

/// Resolved settings for talking to the mail service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: Url,
    /// Upper bound for every request
    pub timeout: Duration,
    /// How overlapping mailbox responses are resolved
    pub ordering: ResponseOrdering,
}

impl ServiceConfig {
    /// Load from the environment and the user's config directory
    pub fn load() -> Result<Self> {
        Self::load_in(&ConfigDir::user()?)
    }

    /// Load from the environment and `postbox.json` in `dir`, if present
    pub fn load_in(dir: &ConfigDir) -> Result<Self> {
        let file = dir.read_json(CONFIG_FILE)?;
        let api_url = non_empty_var(API_URL_VAR);
        let env_flag = non_empty_var(ENV_FLAG_VAR);
        Self::resolve(api_url.as_deref(), env_flag.as_deref(), file)
    }

    /// Load from a specific JSON file, ignoring the environment
    pub fn from_file(path: &Path) -> Result<Self> {
        let file: ConfigFile = config::read_json_file(path)?;
        Self::resolve(None, None, Some(file))
    }

    /// Combine the configuration sources
    pub fn resolve(
        api_url: Option<&str>,
        env_flag: Option<&str>,
        file: Option<ConfigFile>,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();

        let raw_url = api_url
            .map(str::to_string)
            .or(file.api_url)
            .unwrap_or_else(|| Environment::from_flag(env_flag).api_url().to_string());
        let base_url =
            Url::parse(&raw_url).with_context(|| format!("Invalid mail service URL: {}", raw_url))?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            ordering: file.ordering.unwrap_or_default(),
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
