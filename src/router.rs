//! Request resolution: path in, cache record and representation out.
//!
//! Four steps, no I/O:
//!
//! 1. **Normalize** — percent-decode the path, make it absolute and clean it
//!    lexically, so `/a/./b/../c//d/` becomes `/a/c/d`, `/my%20file.js`
//!    becomes `/my file.js` and `/../../etc/passwd` becomes `/etc/passwd`.
//!    The result is only ever used as a map key.
//! 2. **Lookup** the normalized path.
//! 3. **Fall back** to `/index.html` on a miss. Client-side routes
//!    (`/users/42/settings`) all land on the app shell.
//! 4. **Negotiate** — gzip if the record has a gzip payload and the client
//!    accepts gzip, identity otherwise.

use std::path::Path;

use http::StatusCode;
use percent_encoding::percent_decode_str;
use tracing::{debug, error};

use crate::cache::{AssetCache, CacheRecord, ROOT_DOCUMENT};
use crate::error::Error;
use crate::mime::MimeTypes;
use crate::request::Request;
use crate::response::{Encoding, Response};

/// The outcome of [`Router::resolve`].
#[derive(Clone, Copy, Debug)]
pub struct Resolved<'a> {
    pub record: &'a CacheRecord,
    pub encoding: Encoding,
}

/// The application router.
///
/// Owns the [`AssetCache`] for the life of the process. Build it once at
/// startup and pass it to [`Server::serve`](crate::Server::serve); it is
/// read-only from then on and safe to share across every connection.
#[derive(Debug)]
pub struct Router {
    cache: AssetCache,
}

impl Router {
    pub fn new(cache: AssetCache) -> Self {
        Self { cache }
    }

    /// Build the cache from `root` and wrap it in a router.
    pub fn build(root: impl AsRef<Path>, mime: &MimeTypes) -> Result<Self, Error> {
        AssetCache::build(root, mime).map(Self::new)
    }

    pub fn cache(&self) -> &AssetCache { &self.cache }

    /// Pick the record and representation for a request.
    ///
    /// `request_path` is the path as it arrives on the wire, still
    /// percent-encoded.
    ///
    /// # Errors
    ///
    /// [`Error::Unresolvable`] when even `/index.html` is missing, which a
    /// built cache rules out.
    pub fn resolve(&self, request_path: &str, accept_encoding: &str) -> Result<Resolved<'_>, Error> {
        let path = normalize(&percent_decode_str(request_path).decode_utf8_lossy());

        let record = self.cache.get(&path)
            .or_else(|| self.cache.get(ROOT_DOCUMENT))
            .ok_or(Error::Unresolvable { path })?;

        let encoding = if record.should_compress() && accepts_gzip(accept_encoding) {
            Encoding::Gzip
        } else {
            Encoding::Identity
        };

        Ok(Resolved { record, encoding })
    }

    /// Resolve `req` and render the response. Never fails: a resolution
    /// fault is logged and answered with a bare `500`.
    pub fn respond(&self, req: &Request) -> Response {
        match self.resolve(req.path(), req.accept_encoding()) {
            Ok(Resolved { record, encoding }) => {
                debug!(
                    method = %req.method(),
                    path = %req.path(),
                    served = %record.url_path(),
                    ?encoding,
                    "serving"
                );
                Response::asset(record, encoding)
            }
            Err(e) => {
                error!(fault = "unresolvable", path = %req.path(), "{e}");
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

// ── Path normalization ────────────────────────────────────────────────────────

/// Root the path and clean it lexically. Expects an already-decoded path.
///
/// Collapses repeated separators, drops `.` segments, resolves `..` against
/// the preceding segment and discards `..` at the root. The result is always
/// absolute with no trailing slash (except `/` itself).
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => { segments.pop(); }
            s => segments.push(s),
        }
    }

    let mut cleaned = String::with_capacity(path.len() + 1);
    for segment in &segments {
        cleaned.push('/');
        cleaned.push_str(segment);
    }
    if cleaned.is_empty() {
        cleaned.push('/');
    }
    cleaned
}

// ── Encoding negotiation ──────────────────────────────────────────────────────

/// `true` if an `Accept-Encoding` value lists `gzip` with a non-zero quality.
///
/// Token-aware: `gzip;q=0.8` is accepted, `gzip;q=0` is refused, and
/// `x-gzipped` is not `gzip`.
pub fn accepts_gzip(accept_encoding: &str) -> bool {
    accept_encoding.split(',').any(|item| {
        let mut parts = item.split(';');
        let coding = parts.next().unwrap_or("").trim();
        coding.eq_ignore_ascii_case("gzip") && !parts.any(is_zero_quality)
    })
}

fn is_zero_quality(param: &str) -> bool {
    let Some((key, value)) = param.split_once('=') else { return false };
    key.trim().eq_ignore_ascii_case("q")
        && value.trim().parse::<f32>().is_ok_and(|q| q == 0.0)
}
