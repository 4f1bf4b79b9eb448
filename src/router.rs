//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get an [`Endpoint`].

use std::collections::HashMap;

use matchit::Router as MatchitRouter;

use crate::handler::{Endpoint, Handler};
use crate::method::Method;

/// The site's route table and the handler behind it.
///
/// Built once at startup by [`Site::into_router`](crate::Site::into_router)
/// and passed to [`Server::serve`](crate::Server::serve).
pub struct Router {
    routes: HashMap<Method, MatchitRouter<Endpoint>>,
    handler: Box<dyn Handler>,
}

impl Router {
    pub(crate) fn new(handler: impl Handler) -> Self {
        Self { routes: HashMap::new(), handler: Box::new(handler) }
    }

    /// Registers `endpoint` for a method + path pair. Catch-alls use
    /// `{*name}` syntax.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup.
    pub(crate) fn on(mut self, method: Method, path: &str, endpoint: Endpoint) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, endpoint)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn get(self, path: &str, endpoint: Endpoint) -> Self {
        self.on(Method::Get, path, endpoint)
    }

    pub(crate) fn post(self, path: &str, endpoint: Endpoint) -> Self {
        self.on(Method::Post, path, endpoint)
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Option<Endpoint> {
        let tree = self.routes.get(&method)?;
        tree.at(path).ok().map(|matched| *matched.value)
    }

    /// Methods that have a route matching `path`, for `405` responses.
    pub(crate) fn allowed(&self, path: &str) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|m| self.routes.get(m).is_some_and(|tree| tree.at(path).is_ok()))
            .collect()
    }

    pub(crate) fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::BoxFuture;
    use crate::request::Request;
    use crate::response::Response;
    use crate::status::Status;

    struct Unused;

    impl Handler for Unused {
        fn handle(&self, _: Endpoint, _: Request) -> BoxFuture<'_> {
            Box::pin(async { Response::status(Status::Ok) })
        }
    }

    #[test]
    fn root_and_catch_all_coexist() {
        let router = Router::new(Unused)
            .get("/", Endpoint::Page)
            .get("/{*path}", Endpoint::Page)
            .post("/submit-form", Endpoint::Submit);

        assert_eq!(router.lookup(Method::Get, "/"), Some(Endpoint::Page));
        assert_eq!(router.lookup(Method::Get, "/css/site.css"), Some(Endpoint::Page));
        assert_eq!(router.lookup(Method::Post, "/submit-form"), Some(Endpoint::Submit));
        assert_eq!(router.lookup(Method::Post, "/about"), None);
        assert_eq!(router.lookup(Method::Head, "/"), None);
    }

    #[test]
    fn allowed_lists_matching_methods() {
        let router = Router::new(Unused)
            .get("/{*path}", Endpoint::Page)
            .post("/submit-form", Endpoint::Submit);
        assert_eq!(router.allowed("/submit-form"), vec![Method::Get, Method::Post]);
        assert_eq!(router.allowed("/about"), vec![Method::Get]);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = Router::new(Unused).get("/{a}", Endpoint::Page).get("/{b}", Endpoint::Page);
    }
}
