//! Incoming HTTP request type.

use bytes::Bytes;

use crate::form::FormFields;

/// An incoming HTTP request with its body already collected.
///
/// Only what the endpoints read is kept: the raw path for pages, the body
/// for the contact form.
#[derive(Debug)]
pub(crate) struct Request {
    path: String,
    body: Bytes,
}

impl Request {
    pub(crate) fn new(uri: &http::Uri, body: Bytes) -> Self {
        Self { path: uri.path().to_owned(), body }
    }

    /// The raw, still percent-encoded request path.
    pub(crate) fn path(&self) -> &str { &self.path }

    /// Decodes the body as `application/x-www-form-urlencoded` fields.
    pub(crate) fn form(&self) -> FormFields {
        FormFields::parse(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_path_without_query() {
        let uri: http::Uri = "/caf%C3%A9?status=success".parse().unwrap();
        let req = Request::new(&uri, Bytes::new());
        assert_eq!(req.path(), "/caf%C3%A9");
    }

    #[test]
    fn decodes_form_body() {
        let uri: http::Uri = "/submit-form".parse().unwrap();
        let body = Bytes::from_static(b"name=Ada+Lovelace&email=ada%40example.com");
        let req = Request::new(&uri, body);

        let form = req.form();
        assert_eq!(form.get("name"), Some("Ada Lovelace"));
        assert_eq!(form.get("email"), Some("ada@example.com"));
    }
}
