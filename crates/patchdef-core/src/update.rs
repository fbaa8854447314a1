//! Definitions update client.
//!
//! Thin synchronous wrapper around the update server: fetch the published
//! defs checksum, compare it against the local copy, download a fresh file.
//! No retries; a failed fetch surfaces immediately.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::Result;
use crate::hash::md5_of_file;

/// Version tag embedded in the server-side defs filenames.
pub const DEFS_FORMAT_VERSION: u32 = 3;

/// Default local definitions filename.
pub const DEFS_FILENAME: &str = "patchdef.def";

pub struct UpdateClient {
    client: Client,
    server: String,
}

impl UpdateClient {
    pub fn new(server: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            server: server.to_string(),
        })
    }

    fn defs_url(&self, extension: &str) -> String {
        format!(
            "http://{}/patchdef_v{}.{}",
            self.server, DEFS_FORMAT_VERSION, extension
        )
    }

    /// Published MD5 of the latest definitions file.
    pub fn latest_defs_md5(&self) -> Result<String> {
        let url = self.defs_url("md5");
        let response = self.client.get(&url).send()?.error_for_status()?;
        let text = response.text()?;
        Ok(text.trim().to_ascii_lowercase())
    }

    /// Whether the server carries a definitions file differing from the
    /// local one. A missing or unreadable local file counts as an update
    /// being available.
    pub fn update_available<P: AsRef<Path>>(&self, local_defs: P) -> Result<bool> {
        let latest = self.latest_defs_md5()?;

        match md5_of_file(local_defs) {
            Ok(current) => Ok(current != latest),
            Err(e) => {
                debug!("No usable local defs file ({}), update needed", e);
                Ok(true)
            }
        }
    }

    /// Download the latest definitions file to `destination`, replacing any
    /// existing file.
    pub fn download_defs<P: AsRef<Path>>(&self, destination: P) -> Result<()> {
        let url = self.defs_url("def");
        let response = self.client.get(&url).send()?.error_for_status()?;
        let body = response.bytes()?;
        fs::write(destination, &body)?;
        Ok(())
    }
}
