//! C1 Fetcher: resolve a `(group, id, version, filename)` tuple to a local
//! file, MD5-verified, per SPEC_FULL.md §4.1. Grounded on this codebase's
//! `download.rs`, stripped of its retry loop and progress bars: the bridge
//! runs once per artifact tree with a human present, so a failed request is
//! surfaced immediately rather than retried (see SPEC_FULL.md's "Transport"
//! note under §4.1).

use std::path::PathBuf;
use std::time::Duration;

use bridge_util::errors::BridgeError;
use bridge_util::hash;
use reqwest::Client;

use crate::repository;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// HTTP-backed implementation of the `Fetcher.download` external interface.
/// One instance is built at process start and reused for the whole run.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> miette::Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("savant-maven-bridge/0.1")
            .build()
            .map_err(|e| BridgeError::io_failure(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// `fetch(coord, filename) -> local path | absent`. The `.md5` sidecar
    /// is fetched first: its absence means the artifact itself is absent
    /// (step 1). A present sidecar with a missing/bad primary file, or a
    /// checksum mismatch, is fatal (step 4) — the bridge never publishes
    /// unverified bytes.
    pub async fn fetch(
        &self,
        group: &str,
        id: &str,
        version: &str,
        filename: &str,
    ) -> miette::Result<Option<PathBuf>> {
        let url = repository::file_url(group, id, version, filename);
        let md5_url = format!("{url}.md5");

        tracing::debug!(url = %url, "fetching");

        let md5_body = match self.get_text(&md5_url).await? {
            None => return Ok(None),
            Some(body) => body,
        };
        let expected = hash::extract_md5(&md5_body).ok_or_else(|| {
            BridgeError::io_failure(format!("malformed MD5 sidecar at {md5_url}"))
        })?;

        let bytes = match self.get_bytes(&url).await? {
            None => return Ok(None),
            Some(bytes) => bytes,
        };
        let actual = hash::md5_bytes(&bytes);
        if !actual.eq_ignore_ascii_case(&expected) {
            return Err(BridgeError::io_failure(format!(
                "MD5 mismatch for {url}: expected {expected}, got {actual}"
            ))
            .into());
        }

        let mut temp = tempfile::NamedTempFile::new().map_err(BridgeError::Io)?;
        std::io::Write::write_all(&mut temp, &bytes).map_err(BridgeError::Io)?;
        let (_file, path) = temp.keep().map_err(|e| BridgeError::io_failure(e.to_string()))?;
        Ok(Some(path))
    }

    async fn get_bytes(&self, url: &str) -> miette::Result<Option<Vec<u8>>> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BridgeError::io_failure(format!("request to {url} failed: {e}")))?;
        match resp.status() {
            s if s == reqwest::StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => {
                let bytes = resp.bytes().await.map_err(|e| {
                    BridgeError::io_failure(format!("failed reading response from {url}: {e}"))
                })?;
                Ok(Some(bytes.to_vec()))
            }
            s => Err(BridgeError::io_failure(format!("HTTP {s} fetching {url}")).into()),
        }
    }

    async fn get_text(&self, url: &str) -> miette::Result<Option<String>> {
        Ok(self
            .get_bytes(url)
            .await?
            .map(|bytes| String::from_utf8_lossy(&bytes).to_string()))
    }
}
