//! Unified error type.

use std::io;
use std::path::PathBuf;

use crate::cache::ROOT_DOCUMENT;

/// The error type returned by spa-cache's fallible operations.
///
/// Build errors abort [`AssetCache::build`](crate::AssetCache::build) as a
/// whole: a partially-built cache is never handed out. Request errors fail a
/// single request and never reach the client beyond a bare `500`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", .path.display())]
    ReadFile { path: PathBuf, source: io::Error },

    #[error("failed to gzip {}: {source}", .path.display())]
    Compress { path: PathBuf, source: io::Error },

    #[error("root document {} not found", ROOT_DOCUMENT)]
    MissingRoot,

    /// Neither the requested path nor the fallback document is cached.
    ///
    /// Cannot happen for a cache that came out of a successful build.
    #[error("no cache record for {path}, not even {}", ROOT_DOCUMENT)]
    Unresolvable { path: String },

    #[error("io: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// `true` for the errors that abort a cache build.
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::ReadDir { .. } | Self::ReadFile { .. } | Self::Compress { .. } | Self::MissingRoot
        )
    }
}
