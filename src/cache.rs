//! The in-memory asset cache and the directory walk that fills it.
//!
//! # Build once, read forever
//!
//! [`AssetCache::build`] walks the asset root depth-first, reads every
//! published file into memory and gzips it. Entries whose name starts with
//! `.` or `_` are never published, and neither are entries whose name is not
//! valid UTF-8: no URL key can name them. The walk either succeeds
//! completely or fails with the first error; there is no partial cache.
//!
//! After the build nothing is ever written again. Every record is plain
//! data, so the cache can be read by any number of requests at once without
//! a lock in sight.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::compress;
use crate::error::Error;
use crate::mime::MimeTypes;

/// The document every unknown path falls back to. Must exist in every cache.
pub const ROOT_DOCUMENT: &str = "/index.html";

// ── CacheRecord ───────────────────────────────────────────────────────────────

/// One published file.
///
/// Both payloads are [`Bytes`]: handing one to a response bumps a reference
/// count, it never copies the file.
#[derive(Clone, Debug)]
pub struct CacheRecord {
    url_path: String,
    content_type: String,
    plain: Bytes,
    compressed: Option<Bytes>,
}

impl CacheRecord {
    /// Lookup key: absolute, `/`-separated, relative to the asset root.
    pub fn url_path(&self) -> &str { &self.url_path }

    /// Resolved content type, `""` when the extension is unknown.
    pub fn content_type(&self) -> &str { &self.content_type }

    /// Raw file contents.
    pub fn plain(&self) -> &Bytes { &self.plain }

    pub fn plain_size(&self) -> usize { self.plain.len() }

    /// Gzipped contents. `Some` exactly when [`should_compress`](Self::should_compress).
    pub fn compressed(&self) -> Option<&Bytes> { self.compressed.as_ref() }

    pub fn compressed_size(&self) -> Option<usize> {
        self.compressed.as_ref().map(Bytes::len)
    }

    /// Decided at build time; never re-evaluated per request.
    pub fn should_compress(&self) -> bool { self.compressed.is_some() }
}

// ── AssetCache ────────────────────────────────────────────────────────────────

/// Immutable map from URL path to [`CacheRecord`].
#[derive(Debug)]
pub struct AssetCache {
    records: HashMap<String, CacheRecord>,
}

impl AssetCache {
    /// Walk `root` and cache every published file beneath it.
    ///
    /// Blocking. Call it before the server starts, not from inside a request.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable directory or file, on a gzip failure,
    /// and with [`Error::MissingRoot`] when `root` has no `index.html`.
    pub fn build(root: impl AsRef<Path>, mime: &MimeTypes) -> Result<Self, Error> {
        let root = root.as_ref();
        debug!(root = %root.display(), "building asset cache");

        let mut found = Vec::new();
        walk_dir(root, "", mime, &mut found)?;

        let records: HashMap<String, CacheRecord> = found
            .into_iter()
            .map(|record| (record.url_path.clone(), record))
            .collect();

        if !records.contains_key(ROOT_DOCUMENT) {
            return Err(Error::MissingRoot);
        }

        info!(root = %root.display(), files = records.len(), "asset cache ready");
        Ok(Self { records })
    }

    /// Exact-key lookup. No normalization, no fallback.
    pub fn get(&self, url_path: &str) -> Option<&CacheRecord> {
        self.records.get(url_path)
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// All records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &CacheRecord> {
        self.records.values()
    }
}

// ── Directory walk ────────────────────────────────────────────────────────────

/// Hidden (`.`) and private (`_`) entries are never published.
fn is_published(name: &str) -> bool {
    !(name.starts_with('.') || name.starts_with('_'))
}

/// Depth-first walk of `dir`, appending one record per published file.
///
/// `url_prefix` is the URL path of `dir` itself: `""` for the root, `"/css"`
/// for `<root>/css`.
fn walk_dir(
    dir: &Path,
    url_prefix: &str,
    mime: &MimeTypes,
    out: &mut Vec<CacheRecord>,
) -> Result<(), Error> {
    debug!(dir = %dir.display(), "reading directory");

    let read_dir_err = |source: std::io::Error| Error::ReadDir { path: dir.to_path_buf(), source };

    let mut entries = fs::read_dir(dir)
        .map_err(read_dir_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let fpath = entry.path();
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            warn!(path = %fpath.display(), "skipping entry with a non-UTF-8 name");
            continue;
        };

        if !is_published(name) {
            debug!(path = %fpath.display(), "skipping unpublished entry");
            continue;
        }

        let upath = format!("{url_prefix}/{name}");
        let file_type = entry.file_type().map_err(read_dir_err)?;

        if file_type.is_dir() {
            walk_dir(&fpath, &upath, mime, out)?;
        } else {
            out.push(load_file(&fpath, upath, mime)?);
        }
    }

    Ok(())
}

/// Read, classify and (maybe) compress one file.
fn load_file(fpath: &Path, url_path: String, mime: &MimeTypes) -> Result<CacheRecord, Error> {
    debug!(path = %fpath.display(), "found file");

    let plain = fs::read(fpath)
        .map_err(|source| Error::ReadFile { path: fpath.to_path_buf(), source })?;
    let content_type = mime.for_path(fpath).to_owned();

    let gzipped = compress::gzip(&plain)
        .map_err(|source| Error::Compress { path: fpath.to_path_buf(), source })?;

    let compressed = compress::should_compress(&content_type, plain.len(), gzipped.len())
        .then(|| Bytes::from(gzipped));

    let record = CacheRecord {
        url_path,
        content_type,
        plain: Bytes::from(plain),
        compressed,
    };

    info!(
        path = %record.url_path,
        content_type = %record.content_type,
        bytes = record.plain_size(),
        compressed = ?record.compressed_size(),
        "cached file"
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_and_underscore_entries_are_private() {
        assert!(!is_published(".git"));
        assert!(!is_published(".env"));
        assert!(!is_published("_drafts"));
        assert!(is_published("index.html"));
        assert!(is_published("a_b.js"));
    }

    #[test]
    fn incompressible_file_keeps_no_gzip_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        fs::write(&path, vec![b'x'; 10_000]).unwrap();

        let record = load_file(&path, "/logo.png".to_owned(), &MimeTypes::default()).unwrap();
        assert_eq!(record.content_type(), "image/png");
        assert_eq!(record.plain_size(), 10_000);
        assert!(!record.should_compress());
        assert!(record.compressed().is_none());
    }

    #[test]
    fn small_file_is_served_plain() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("robots.txt");
        fs::write(&path, "User-agent: *\nDisallow:\n").unwrap();

        let record = load_file(&path, "/robots.txt".to_owned(), &MimeTypes::default()).unwrap();
        assert_eq!(record.content_type(), "text/plain");
        assert!(!record.should_compress());
        assert_eq!(record.compressed_size(), None);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.js");

        let err = load_file(&path, "/gone.js".to_owned(), &MimeTypes::default()).unwrap_err();
        match err {
            Error::ReadFile { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
