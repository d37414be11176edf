//! Artifact resolution
//!
//! Maps a [`Coordinate`] plus a repository base location to a fetch URL
//! and a local cache file, then delegates the transfer decision to the
//! [`Downloader`]. The cache mirrors the repository-relative path under
//! the cache root; the filesystem itself is the cache index.

use std::path::{Path, PathBuf};

use url::Url;

use crate::context::Context;
use crate::coordinate::Coordinate;
use crate::download::Downloader;
use crate::error::{Error, Result};

/// Resolves coordinates into verified local cache files
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    downloader: Downloader,
}

impl Resolver {
    /// Create a resolver delegating transfers to the given downloader
    pub fn new(downloader: Downloader) -> Self {
        Self { downloader }
    }

    /// Resolve `coordinate` below `cache_root`, fetching from
    /// `repository_base` when the cache cannot satisfy it
    ///
    /// Returns the local file path the downloader produced. Concurrent
    /// resolves of the same coordinate are not serialized against each
    /// other; callers needing that hold their own lock.
    pub async fn resolve(
        &self,
        ctx: &Context,
        coordinate: &Coordinate,
        cache_root: &Path,
        repository_base: &Url,
    ) -> Result<PathBuf> {
        let repository_path = coordinate.repository_path();
        let source = join_repository(repository_base, &repository_path)?;
        let target_dir = mirror_dir(cache_root, &repository_path);
        tokio::fs::create_dir_all(&target_dir).await?;
        tracing::debug!(coordinate = %coordinate, uri = %source, "resolving");
        self.downloader
            .download(ctx, &target_dir, source.as_str())
            .await
    }
}

/// Join the repository-relative path onto the base, treating the base as
/// a directory whether or not it ends with a slash
fn join_repository(base: &Url, repository_path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(repository_path).map_err(|_| Error::UriNotAbsolute {
        uri: format!("{base}{repository_path}"),
    })
}

/// Local directory mirroring the repository layout under the cache root
fn mirror_dir(cache_root: &Path, repository_path: &str) -> PathBuf {
    match Path::new(repository_path).parent() {
        Some(parent) => cache_root.join(parent),
        None => cache_root.to_path_buf(),
    }
}
