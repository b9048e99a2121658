//! Token store persisted as a small JSON file.
//!
//! The file holds a JSON object; the token lives under the `token` key and
//! any other keys are preserved on write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use sheconnects_core::session::{BearerToken, Result, SessionError, TokenStore};

const TOKEN_KEY: &str = "token";

/// [`TokenStore`] backed by a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(storage(e)),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&text).map_err(storage)? {
            Value::Object(map) => Ok(map),
            _ => Err(SessionError::Storage(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(storage)?;
        }
        let text = serde_json::to_string_pretty(map).map_err(storage)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(storage)?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &self.path).map_err(storage)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<BearerToken>> {
        let map = self.read_map()?;
        Ok(map
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(BearerToken::new))
    }

    fn save(&self, token: &BearerToken) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(
            TOKEN_KEY.to_string(),
            Value::String(token.expose().to_string()),
        );
        self.write_map(&map)
    }

    fn clear(&self) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}

fn storage(error: impl std::fmt::Display) -> SessionError {
    SessionError::Storage(error.to_string())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(storage)
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
