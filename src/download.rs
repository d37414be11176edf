//! Cache-aware downloader
//!
//! Fetches one remote resource into a target directory, re-transferring
//! only when the local copy's size or last-modified timestamp disagrees
//! with the remote's. The same conditional-fetch protocol applies to every
//! transport: `http`/`https` (metadata via `HEAD`) and `file` (metadata
//! via the filesystem, the deterministic network stand-in for tests).
//!
//! Each branch emits a stable sequence of progress lines through the
//! [`Context`] log sink; callers may assert on it.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use filetime::FileTime;
use url::Url;

use crate::context::Context;
use crate::error::{Error, Result};

/// Size and last-modified timestamp of a remote resource
#[derive(Clone, Copy, Debug)]
struct RemoteAttributes {
    size: Option<u64>,
    modified: Option<SystemTime>,
}

/// Downloader with a reusable HTTP client
///
/// Cheap to clone; the inner client pools connections.
#[derive(Clone, Debug, Default)]
pub struct Downloader {
    client: reqwest::Client,
}

impl Downloader {
    /// Create a downloader with a default HTTP client
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `source_uri` into `target_dir`, returning the local file path
    ///
    /// `target_dir` must already exist. A relative `source_uri` fails
    /// before any I/O. With offline mode active an existing target is
    /// trusted as-is and a missing target is a fatal condition; online,
    /// the remote attributes decide whether a transfer happens at all.
    pub async fn download(
        &self,
        ctx: &Context,
        target_dir: &Path,
        source_uri: &str,
    ) -> Result<PathBuf> {
        let url = Url::parse(source_uri).map_err(|_| Error::UriNotAbsolute {
            uri: source_uri.to_string(),
        })?;
        let file_name = file_name_of(&url)?;
        let target = target_dir.join(&file_name);

        ctx.log(format!("Downloading {url}..."));
        if ctx.offline() {
            if target.exists() {
                ctx.log("Offline mode is active and target already exists.");
                return Ok(target);
            }
            return Err(Error::OfflineTargetMissing { target });
        }

        let remote = self.remote_attributes(&url).await?;
        if target.exists() {
            ctx.log("Local file exists. Comparing attributes to remote file...");
            let local = tokio::fs::metadata(&target).await?;
            if attributes_match(&local, &remote) {
                ctx.log("Local and remote file attributes seem to match.");
                return Ok(target);
            }
            ctx.log("Local file differs from remote -- replacing it...");
        }

        ctx.log(format!("Transferring {url}..."));
        self.transfer(&url, &target).await?;
        if let Some(modified) = remote.modified {
            filetime::set_file_mtime(&target, FileTime::from_system_time(modified))?;
        }
        let size = tokio::fs::metadata(&target).await?.len();
        ctx.log(format!("Downloaded {file_name} successfully."));
        ctx.log(format!(" o Size -> {size} bytes"));
        ctx.log(format!(" o Last Modified {}", format_modified(remote.modified)));
        tracing::debug!(uri = %url, target = %target.display(), size, "transfer complete");
        Ok(target)
    }

    /// Query size and last-modified without transferring a body
    async fn remote_attributes(&self, url: &Url) -> Result<RemoteAttributes> {
        match url.scheme() {
            "file" => {
                let path = local_path(url)?;
                let metadata = tokio::fs::metadata(&path)
                    .await
                    .map_err(|e| transfer_error(url, e))?;
                Ok(RemoteAttributes {
                    size: Some(metadata.len()),
                    modified: metadata.modified().ok(),
                })
            }
            _ => {
                let response = self
                    .client
                    .head(url.clone())
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(|e| transfer_error(url, e))?;
                let size = response
                    .headers()
                    .get(reqwest::header::CONTENT_LENGTH)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                let modified = response
                    .headers()
                    .get(reqwest::header::LAST_MODIFIED)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
                    .map(|dt| SystemTime::from(dt.with_timezone(&Utc)));
                Ok(RemoteAttributes { size, modified })
            }
        }
    }

    /// Transfer the full body to `target`, replacing any existing file
    async fn transfer(&self, url: &Url, target: &Path) -> Result<()> {
        match url.scheme() {
            "file" => {
                let path = local_path(url)?;
                tokio::fs::copy(&path, target)
                    .await
                    .map_err(|e| transfer_error(url, e))?;
            }
            _ => {
                let body = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .and_then(reqwest::Response::error_for_status)
                    .map_err(|e| transfer_error(url, e))?
                    .bytes()
                    .await
                    .map_err(|e| transfer_error(url, e))?;
                tokio::fs::write(target, &body).await?;
            }
        }
        Ok(())
    }
}

fn attributes_match(local: &std::fs::Metadata, remote: &RemoteAttributes) -> bool {
    // An unknown remote timestamp falls through to the size comparison
    let times_match = match remote.modified {
        Some(remote_modified) => local.modified().ok() == Some(remote_modified),
        None => true,
    };
    times_match && remote.size == Some(local.len())
}

fn file_name_of(url: &Url) -> Result<String> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::UriMissingFileName {
            uri: url.to_string(),
        })
}

fn local_path(url: &Url) -> Result<PathBuf> {
    url.to_file_path().map_err(|()| Error::UriMissingFileName {
        uri: url.to_string(),
    })
}

fn transfer_error(url: &Url, source: impl std::fmt::Display) -> Error {
    Error::Transfer {
        uri: url.to_string(),
        reason: source.to_string(),
    }
}

fn format_modified(modified: Option<SystemTime>) -> String {
    match modified {
        Some(time) => DateTime::<Utc>::from(time).to_rfc2822(),
        None => "unknown".to_string(),
    }
}
