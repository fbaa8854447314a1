//! Update-server configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Default config filename, looked up next to the working directory.
pub const CONFIG_FILENAME: &str = "patchdef.config";

/// Update-server configuration, read from a small JSON file:
/// `{"update_server": "host"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateConfig {
    /// Hostname (or host:port) of the definitions update server.
    pub update_server: String,
}

impl UpdateConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
