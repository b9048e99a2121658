use std::env;
use std::path::PathBuf;

use crate::client::DEFAULT_BASE_URL;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Resource API base URL (default: "http://localhost:5001")
    pub base_url: String,
    /// Login/signup base URL (default: same as `base_url`)
    pub auth_url: String,
    /// File holding the bearer token (default: "<data dir>/sheconnects/auth.json")
    pub session_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SHECONNECTS_URL` - Resource API base URL
    /// - `SHECONNECTS_AUTH_URL` - Auth API base URL
    /// - `SHECONNECTS_SESSION_FILE` - Token file path
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = var("SHECONNECTS_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let auth_url = var("SHECONNECTS_AUTH_URL").unwrap_or_else(|| base_url.clone());
        let session_file = var("SHECONNECTS_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_session_file);
        Self {
            base_url,
            auth_url,
            session_file,
        }
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        auth_url: Option<String>,
        session_file: Option<PathBuf>,
    ) -> Self {
        if let Some(base_url) = base_url {
            if auth_url.is_none() && self.auth_url == self.base_url {
                self.auth_url = base_url.clone();
            }
            self.base_url = base_url;
        }
        if let Some(auth_url) = auth_url {
            self.auth_url = auth_url;
        }
        if let Some(session_file) = session_file {
            self.session_file = session_file;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// `<data dir>/sheconnects/auth.json`, or `./auth.json` when the platform
/// has no data directory.
pub fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("sheconnects"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("auth.json")
}
