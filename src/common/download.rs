use std::{path::Path, time::Duration};

use anyhow::{Context, Result};
use reqwest::blocking::Client;

use super::fs::PendingWrite;

pub(crate) const USER_AGENT: &str = concat!("careatlas/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client shared by the download and geocoding paths.
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("[download] Failed to build HTTP client")
}

/// Download `file_url` to `out_path` (tempfile -> atomic rename).
pub(crate) fn download_file(file_url: &str, out_path: &Path, force: bool) -> Result<()> {
    let mut sink = PendingWrite::open(out_path, force)?;

    let mut resp = http_client(Duration::from_secs(60))?
        .get(file_url)
        .send()
        .with_context(|| format!("GET {file_url}"))?
        .error_for_status()
        .with_context(|| format!("GET {file_url} returned error status"))?;

    std::io::copy(&mut resp, &mut sink).with_context(|| format!("write {}", out_path.display()))?;

    sink.finalize()
}
