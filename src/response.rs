//! Outgoing HTTP response and the representation it carries.
//!
//! A [`Response`] is a status, a short header list and a body that points
//! straight into the cache. Turning it into a hyper response copies no
//! payload bytes.

use bytes::Bytes;
use http::header::{CONTENT_ENCODING, CONTENT_TYPE, HeaderValue, VARY};
use http::{HeaderMap, StatusCode};
use http_body_util::Full;
use tracing::warn;

use crate::cache::CacheRecord;

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Which payload of a record gets sent.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Encoding {
    /// The raw file bytes.
    Identity,
    /// The gzip payload, sent with `Content-Encoding: gzip`.
    Gzip,
}

impl Encoding {
    /// The `Content-Encoding` token, `None` for identity.
    pub fn as_header(self) -> Option<&'static str> {
        match self {
            Self::Identity => None,
            Self::Gzip => Some("gzip"),
        }
    }
}

// ── Response ──────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Bytes,
    pub(crate) headers: HeaderMap,
    pub(crate) status: StatusCode,
}

impl Response {
    /// `200 OK` serving `record` in the given representation.
    ///
    /// Asking for [`Encoding::Gzip`] on a record without a gzip payload falls
    /// back to identity. `Content-Type` is omitted when the type is unknown or
    /// is not a valid header value.
    pub fn asset(record: &CacheRecord, encoding: Encoding) -> Self {
        let mut headers = HeaderMap::new();

        if !record.content_type().is_empty() {
            match HeaderValue::from_str(record.content_type()) {
                Ok(value) => { headers.insert(CONTENT_TYPE, value); }
                Err(_) => warn!(
                    path = %record.url_path(),
                    content_type = %record.content_type(),
                    "content type is not a valid header value, omitting it"
                ),
            }
        }

        if record.should_compress() {
            headers.insert(VARY, HeaderValue::from_static("accept-encoding"));
        }

        let body = match (encoding.as_header(), record.compressed()) {
            (Some(token), Some(payload)) => {
                headers.insert(CONTENT_ENCODING, HeaderValue::from_static(token));
                payload.clone()
            }
            _ => record.plain().clone(),
        };

        Self { body, headers, status: StatusCode::OK }
    }

    /// Response with no body and no headers.
    pub fn status(code: StatusCode) -> Self {
        Self { body: Bytes::new(), headers: HeaderMap::new(), status: code }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &Bytes { &self.body }

    /// Header value as `&str`, if present and visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Convert into the hyper/http response the transport writes out.
    pub fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;
        *res.headers_mut() = self.headers;
        res
    }
}
