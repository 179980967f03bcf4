//! Incoming request view.
//!
//! The router only ever looks at two things: the path and `Accept-Encoding`.
//! [`Request`] carries exactly what is needed to answer, detached from the
//! transport so it can be built by hand in tests or by another server.

/// An incoming HTTP request: method, path and headers. No body: the method is
/// never inspected and every request is answered as a `GET`.
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self { method: method.into(), path: path.into(), headers: Vec::new() }
    }

    /// A `GET` for `path` with no headers.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    /// Add a header. Returns `self` for chaining.
    ///
    /// A repeated name is folded into the existing entry as a comma-separated
    /// list, the way HTTP combines list-valued header lines.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
            Some((_, existing)) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            None => self.headers.push((name, value)),
        }
        self
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }

    /// Case-insensitive header lookup.
    ///
    /// Each name holds one entry: repeated lines were already joined with
    /// `", "` when the request was built.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// `Accept-Encoding` value, `""` when absent.
    pub fn accept_encoding(&self) -> &str {
        self.header("accept-encoding").unwrap_or("")
    }
}

impl<B> From<&http::Request<B>> for Request {
    /// Copies the method, the raw path and the headers. Repeated header
    /// lines are joined with `", "`; values that are not visible ASCII are
    /// dropped.
    fn from(req: &http::Request<B>) -> Self {
        let headers = req.headers().keys()
            .filter_map(|name| {
                let values: Vec<&str> = req.headers().get_all(name).iter()
                    .filter_map(|v| v.to_str().ok())
                    .collect();
                (!values.is_empty()).then(|| (name.as_str().to_owned(), values.join(", ")))
            })
            .collect();
        Self {
            method: req.method().as_str().to_owned(),
            path: req.uri().path().to_owned(),
            headers,
        }
    }
}
