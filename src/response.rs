//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] and return it. The server turns it into a
//! hyper response exactly once, right before it goes on the wire.

use bytes::Bytes;
use http_body_util::Full;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use tracing::error;

use crate::status::Status;

/// Bytes that may not appear raw in a `location` header. Non-ASCII is always
/// escaped by `utf8_percent_encode`; `%` is left alone so existing escapes
/// survive.
const LOCATION: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts
///
/// ```rust
/// use contact_relay::{Response, Status};
///
/// Response::status(Status::NotFound);
/// Response::redirect(Status::Found, "/contact?status=success");
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use contact_relay::{Response, Status};
///
/// Response::builder()
///     .status(Status::Ok)
///     .header("cache-control", "no-cache")
///     .body("text/css", b"body{}".to_vec());
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Bytes,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: Status,
}

impl Response {
    /// `200 OK` with an explicit content type, e.g. a file read from disk.
    pub fn file(content_type: &str, body: impl Into<Bytes>) -> Self {
        Self::builder().body(content_type, body)
    }

    /// Response with no body.
    pub fn status(code: Status) -> Self {
        Self { body: Bytes::new(), headers: Vec::new(), status: code }
    }

    /// Redirect to `location` with no body.
    ///
    /// Characters that are not valid in a header value are percent-encoded,
    /// so any path the caller hands in produces a well-formed header.
    pub fn redirect(code: Status, location: &str) -> Self {
        let location = utf8_percent_encode(location, LOCATION).to_string();
        Self::builder().status(code).header("location", &location).no_body()
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok }
    }

    pub fn status_code(&self) -> Status { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper representation.
    ///
    /// A header that hyper refuses degrades to an empty `500` rather than
    /// failing the connection.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(http::StatusCode::from(self.status));
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(Full::new(self.body)).unwrap_or_else(|e| {
            error!("failed to build response: {e}");
            let mut fallback = http::Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: Status,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a typed body.
    pub fn body(self, content_type: &str, body: impl Into<Bytes>) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body: body.into(), headers, status: self.status }
    }

    /// Terminate with no body (e.g. `Status::MovedPermanently`).
    pub fn no_body(self) -> Response {
        Response { body: Bytes::new(), headers: self.headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`], for endpoint results that are not
/// responses yet (a form [`Outcome`](crate::submit::Outcome)).
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_sets_location_without_body() {
        let res = Response::redirect(Status::Found, "/contact?status=success");
        assert_eq!(res.status_code(), Status::Found);
        assert_eq!(res.header("Location"), Some("/contact?status=success"));
        assert!(res.body().is_empty());
    }

    #[test]
    fn redirect_escapes_bytes_invalid_in_headers() {
        let res = Response::redirect(Status::Found, "/caf\u{e9} page\r\n?x=%20");
        assert_eq!(res.header("location"), Some("/caf%C3%A9%20page%0D%0A?x=%20"));

        let inner = res.into_inner();
        assert_eq!(inner.status(), http::StatusCode::FOUND);
    }

    #[test]
    fn builder_puts_content_type_first() {
        let res = Response::builder()
            .header("cache-control", "no-cache")
            .body("text/css", "body{}");
        assert_eq!(res.headers[0], ("content-type".to_owned(), "text/css".to_owned()));
        assert_eq!(res.header("cache-control"), Some("no-cache"));
        assert_eq!(res.body(), b"body{}");
    }

    #[test]
    fn invalid_header_becomes_500() {
        let res = Response::builder().header("bad header", "x").no_body();
        assert_eq!(res.into_inner().status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
