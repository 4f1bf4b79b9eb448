//! What a matched route runs.
//!
//! The site has exactly two kinds of endpoint, so routes store an
//! [`Endpoint`] tag rather than a boxed closure. The router owns one
//! [`Handler`] (the [`Site`](crate::Site) in production) and the server
//! hands it the tag together with the request:
//!
//! ```text
//! GET /about        ─► router ─► Endpoint::Page   ─┐
//! POST /submit-form ─► router ─► Endpoint::Submit ─┴─► handler.handle(endpoint, req)
//! ```

use std::future::Future;
use std::pin::Pin;

use crate::request::Request;
use crate::response::Response;

/// A boxed response future borrowing the handler.
pub(crate) type BoxFuture<'a> = Pin<Box<dyn Future<Output = Response> + Send + 'a>>;

/// The endpoint a route resolves to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Endpoint {
    /// A static page or asset under the site root.
    Page,
    /// The contact form.
    Submit,
}

/// Answers requests for every [`Endpoint`] the router knows.
pub(crate) trait Handler: Send + Sync + 'static {
    fn handle(&self, endpoint: Endpoint, req: Request) -> BoxFuture<'_>;
}
