//! File-extension to content-type lookup.
//!
//! A plain value, built once and handed to the cache builder. Nothing global,
//! nothing mutated behind your back:
//!
//! ```rust
//! use spa_cache::MimeTypes;
//!
//! let mime = MimeTypes::default()
//!     .with("webmanifest", "application/manifest+json")
//!     .with(".md", "text/markdown");
//!
//! assert_eq!(mime.lookup(".html"), "text/html");
//! assert_eq!(mime.lookup("MD"), "text/markdown");
//! assert_eq!(mime.lookup(".unknown"), "");
//! ```

use std::collections::HashMap;
use std::path::Path;

// ── Seed table ────────────────────────────────────────────────────────────────

const DEFAULT_TYPES: &[(&str, &str)] = &[
    // documents and scripts
    ("htm",   "text/html"),
    ("html",  "text/html"),
    ("xhtml", "application/xhtml+xml"),
    ("css",   "text/css"),
    ("js",    "text/javascript"),
    ("mjs",   "text/javascript"),
    ("map",   "application/json"),
    ("json",  "application/json"),
    ("txt",   "text/plain"),
    ("xml",   "application/xml"),
    ("pdf",   "application/pdf"),
    ("wasm",  "application/wasm"),
    ("zip",   "application/zip"),
    // images
    ("avif",  "image/avif"),
    ("gif",   "image/gif"),
    ("ico",   "image/x-icon"),
    ("jpeg",  "image/jpeg"),
    ("jpg",   "image/jpeg"),
    ("png",   "image/png"),
    ("svg",   "image/svg+xml"),
    ("tif",   "image/tiff"),
    ("tiff",  "image/tiff"),
    ("webp",  "image/webp"),
    // audio / video
    ("mp3",   "audio/mpeg"),
    ("mp4",   "video/mp4"),
    ("mpeg",  "video/mpeg"),
    // fonts
    ("ttf",   "font/ttf"),
    ("woff",  "font/woff"),
    ("woff2", "font/woff2"),
];

// ── MimeTypes ─────────────────────────────────────────────────────────────────

/// Extension → content-type table.
///
/// [`MimeTypes::default`] carries the types a typical single-page-app build
/// emits; [`MimeTypes::new`] starts empty. Keys are stored lower-case without
/// the leading dot, so `".PNG"`, `"png"` and `"Png"` all hit the same entry.
#[derive(Clone, Debug)]
pub struct MimeTypes {
    types: HashMap<String, String>,
}

impl MimeTypes {
    /// An empty table. Every lookup misses until you [`insert`](Self::insert).
    pub fn new() -> Self {
        Self { types: HashMap::new() }
    }

    /// Add or replace a mapping. Returns `self` for chaining.
    pub fn with(mut self, extension: &str, content_type: &str) -> Self {
        self.insert(extension, content_type);
        self
    }

    pub fn insert(&mut self, extension: &str, content_type: &str) {
        self.types.insert(normalize(extension), content_type.to_owned());
    }

    /// Content type for `extension`, or `""` when the extension is unknown.
    pub fn lookup(&self, extension: &str) -> &str {
        self.types
            .get(&normalize(extension))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Content type for the extension of `path`. Files without an extension
    /// resolve to `""`.
    pub fn for_path(&self, path: &Path) -> &str {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self.lookup(ext),
            None => "",
        }
    }

    pub fn len(&self) -> usize { self.types.len() }
    pub fn is_empty(&self) -> bool { self.types.is_empty() }
}

impl Default for MimeTypes {
    fn default() -> Self {
        let types = DEFAULT_TYPES
            .iter()
            .map(|(ext, ct)| ((*ext).to_owned(), (*ct).to_owned()))
            .collect();
        Self { types }
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}
