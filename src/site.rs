//! The route table: static pages plus the contact form endpoint.

use crate::config::Config;
use crate::error::Result;
use crate::handler::{BoxFuture, Endpoint, Handler};
use crate::method::Method;
use crate::pages::Pages;
use crate::relay::{HttpRelay, Relay};
use crate::request::Request;
use crate::response::IntoResponse;
use crate::router::Router;
use crate::submit::SubmitHandler;

/// Everything a request handler needs, built once at startup.
#[derive(Debug)]
pub struct Site<R> {
    pub pages: Pages,
    pub submit: SubmitHandler<R>,
}

impl Site<HttpRelay> {
    /// The production site: pages from `SITE_ROOT`, submissions to the
    /// configured relay.
    pub fn from_config(config: &Config) -> Result<Self> {
        let relay = HttpRelay::new(config.relay_url.clone())?;
        Ok(Self {
            pages: Pages::new(&config.site_root),
            submit: SubmitHandler::new(config.access_key.clone(), relay),
        })
    }
}

impl<R: Relay + 'static> Site<R> {
    /// Routes:
    ///
    /// | Method | Path | Endpoint |
    /// |---|---|---|
    /// | `POST` | `/submit-form` | contact form |
    /// | `GET`, `HEAD` | `/`, `/{*path}` | static pages and assets |
    pub fn into_router(self) -> Router {
        Router::new(self)
            .get("/", Endpoint::Page)
            .get("/{*path}", Endpoint::Page)
            .on(Method::Head, "/", Endpoint::Page)
            .on(Method::Head, "/{*path}", Endpoint::Page)
            .post("/submit-form", Endpoint::Submit)
    }
}

impl<R: Relay + 'static> Handler for Site<R> {
    fn handle(&self, endpoint: Endpoint, req: Request) -> BoxFuture<'_> {
        match endpoint {
            Endpoint::Page => Box::pin(async move { self.pages.respond(req.path()).await }),
            Endpoint::Submit => Box::pin(async move {
                self.submit.handle(&req.form()).await.into_response()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::form::FormSubmission;
    use crate::relay::{AccessKey, ForwardOutcome};
    use crate::status::Status;

    struct Accepting;

    impl Relay for Accepting {
        async fn forward(&self, _: &AccessKey, _: &FormSubmission) -> ForwardOutcome {
            ForwardOutcome::Success { message: "sent".into() }
        }
    }

    fn site(root: &std::path::Path) -> Site<Accepting> {
        Site {
            pages: Pages::new(root),
            submit: SubmitHandler::new(AccessKey::new("key"), Accepting),
        }
    }

    fn request(path: &str, body: &'static [u8]) -> Request {
        Request::new(&path.parse().unwrap(), Bytes::from_static(body))
    }

    #[tokio::test]
    async fn page_endpoint_serves_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("about.html"), "<p>about</p>").unwrap();
        let site = site(dir.path());

        let res = site.handle(Endpoint::Page, request("/about", b"")).await;
        assert_eq!(res.status_code(), Status::Ok);
        assert_eq!(res.body(), b"<p>about</p>");

        let res = site.handle(Endpoint::Page, request("/missing", b"")).await;
        assert_eq!(res.status_code(), Status::NotFound);
    }

    #[tokio::test]
    async fn submit_endpoint_redirects_with_status() {
        let dir = tempfile::tempdir().unwrap();
        let site = site(dir.path());

        let body = b"name=Ada&email=ada%40example.com&message=Hi&return_url=%2Fpricing";
        let res = site.handle(Endpoint::Submit, request("/submit-form", body)).await;
        assert_eq!(res.status_code(), Status::Found);
        assert_eq!(res.header("location"), Some("/pricing?status=success"));
    }

    #[test]
    fn router_sends_pages_and_form_to_their_endpoints() {
        let router = site(std::path::Path::new(".")).into_router();
        assert_eq!(router.lookup(Method::Head, "/about"), Some(Endpoint::Page));
        assert_eq!(router.lookup(Method::Post, "/submit-form"), Some(Endpoint::Submit));
        assert_eq!(router.allowed("/about"), vec![Method::Get, Method::Head]);
    }
}
