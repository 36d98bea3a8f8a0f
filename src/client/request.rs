//! Outgoing request construction.

use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::opt::Opt;
use crate::{Error, Result};

/// An outgoing API request.
///
/// Wraps a `reqwest::Request` and exposes only header and query mutation to
/// [`Opt`] functions. Method, URL path and body are fixed once the request is
/// built.
#[derive(Debug)]
pub struct Request {
    inner: reqwest::Request,
}

impl Request {
    /// Create a bare request with no headers, query or body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            inner: reqwest::Request::new(method, url),
        }
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Fully resolved URL, including query parameters added by options.
    pub fn url(&self) -> &Url {
        self.inner.url()
    }

    /// Request headers.
    pub fn headers(&self) -> &reqwest::header::HeaderMap {
        self.inner.headers()
    }

    /// Value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name).and_then(|v| v.to_str().ok())
    }

    /// First value of a query parameter.
    pub fn query(&self, key: &str) -> Option<String> {
        self.inner
            .url()
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Encoded JSON body, if any.
    pub fn body(&self) -> Option<&[u8]> {
        self.inner.body().and_then(|b| b.as_bytes())
    }

    /// Set a header, replacing any existing value.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        let (name, value) = header_pair(name, value)?;
        self.inner.headers_mut().insert(name, value);
        Ok(())
    }

    /// Append `value` to a comma-separated header, keeping what is there.
    ///
    /// Existing values are joined as raw bytes, so values that are not
    /// visible ASCII are kept too.
    pub fn append_header_value(&mut self, name: &str, value: &str) -> Result<()> {
        let (name, value) = header_pair(name, value)?;
        let joined = match self.inner.headers().get(&name).map(HeaderValue::as_bytes) {
            Some(existing) if !existing.is_empty() => {
                let mut joined = Vec::with_capacity(existing.len() + 1 + value.len());
                joined.extend_from_slice(existing);
                joined.push(b',');
                joined.extend_from_slice(value.as_bytes());
                HeaderValue::from_bytes(&joined)
                    .map_err(|_| Error::InvalidHeader(format!("bad value for header {}", name)))?
            }
            _ => value,
        };
        self.inner.headers_mut().insert(name, joined);
        Ok(())
    }

    /// Append a query parameter.
    pub fn append_query(&mut self, key: &str, value: &str) {
        self.inner.url_mut().query_pairs_mut().append_pair(key, value);
    }

    /// Render the request the way it goes on the wire: request line, headers
    /// and body.
    pub fn dump(&self) -> String {
        let url = self.inner.url();
        let mut target = url.path().to_string();
        if let Some(query) = url.query() {
            target.push('?');
            target.push_str(query);
        }

        let mut out = format!("{} {} HTTP/1.1\r\n", self.inner.method(), target);
        if let Some(host) = url.host_str() {
            match url.port() {
                Some(port) => out.push_str(&format!("Host: {}:{}\r\n", host, port)),
                None => out.push_str(&format!("Host: {}\r\n", host)),
            }
        }
        for (name, value) in self.inner.headers() {
            let value = value.to_str().unwrap_or("<binary>");
            out.push_str(&format!("{}: {}\r\n", name, value));
        }
        out.push_str("\r\n");
        if let Some(body) = self.body() {
            out.push_str(&String::from_utf8_lossy(body));
        }
        out
    }

    pub(crate) fn into_inner(self) -> reqwest::Request {
        self.inner
    }
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| Error::InvalidHeader(format!("bad header name {:?}", name)))?;
    let value = HeaderValue::from_str(value)
        .map_err(|_| Error::InvalidHeader(format!("bad value for header {}", name)))?;
    Ok((name, value))
}

/// Build a request against `base`.
///
/// `path` must be relative: a leading `/` would discard the path prefix of
/// the base URL during resolution and is rejected with
/// [`Error::InvalidPath`]. The body, if any, is encoded as JSON. Options run
/// in order after the request is otherwise complete.
pub(crate) fn build<B>(
    base: &Url,
    method: Method,
    path: &str,
    body: Option<&B>,
    opts: &[Opt],
) -> Result<Request>
where
    B: Serialize + ?Sized,
{
    if path.starts_with('/') {
        return Err(Error::InvalidPath(path.to_string()));
    }
    let url = base.join(path)?;

    let mut request = Request::new(method, url);
    if let Some(body) = body {
        // serde_json never HTML-escapes, so `<`, `>` and `&` reach the API verbatim.
        let encoded = serde_json::to_vec(body).map_err(Error::Encoding)?;
        request
            .inner
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.inner.body_mut() = Some(encoded.into());
    }

    for opt in opts {
        opt.apply(&mut request)?;
    }
    Ok(request)
}
