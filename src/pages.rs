//! Clean-URL resolution of static pages and assets.
//!
//! `/contact` serves `contact.html`, `/contact.html` permanently redirects to
//! `/contact`, and anything else is looked up verbatim under the site root.

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;
use tokio::fs;
use tracing::{debug, warn};

use crate::mime;
use crate::redirect::{PAGE_SUFFIX, clean_page_url, changes_host};
use crate::response::Response;
use crate::status::Status;

const ROOT_PAGE: &str = "index.html";

/// What a GET path resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Canonical path of an existing file inside the site root.
    Serve(PathBuf),
    Redirect { location: String, permanent: bool },
    NotFound,
}

/// The static site rooted at one directory.
#[derive(Debug, Clone)]
pub struct Pages {
    root: PathBuf,
}

impl Pages {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path { &self.root }

    /// Resolves an already percent-decoded request path.
    ///
    /// Order: the root page for `/`; a permanent redirect for any `.html`
    /// path, whether or not the file exists; `<path>.html`; `<path>`
    /// verbatim; otherwise not found.
    pub async fn resolve(&self, path: &str) -> Resolution {
        if path == "/" {
            return self.probe(ROOT_PAGE).await.map_or(Resolution::NotFound, Resolution::Serve);
        }

        let name = path.trim_start_matches('/');
        if let Some(location) = clean_page_url(name) {
            if changes_host(&location) {
                warn!(path, "legacy page path would redirect off-site");
                return Resolution::NotFound;
            }
            return Resolution::Redirect { location, permanent: true };
        }

        if !is_plain_relative(name) {
            warn!(path, "path traversal attempt blocked");
            return Resolution::NotFound;
        }

        if let Some(page) = self.probe(&format!("{name}{PAGE_SUFFIX}")).await {
            return Resolution::Serve(page);
        }
        self.probe(name).await.map_or(Resolution::NotFound, Resolution::Serve)
    }

    /// Answers a GET for the raw (percent-encoded) request path.
    pub async fn respond(&self, raw_path: &str) -> Response {
        let Ok(path) = percent_decode_str(raw_path).decode_utf8() else {
            return Response::status(Status::NotFound);
        };

        match self.resolve(&path).await {
            Resolution::Serve(file) => match fs::read(&file).await {
                Ok(bytes) => Response::file(mime::content_type(&file), bytes),
                Err(e) => {
                    debug!(file = %file.display(), "failed to read file: {e}");
                    Response::status(Status::NotFound)
                }
            },
            Resolution::Redirect { location, permanent } => {
                let code = if permanent { Status::MovedPermanently } else { Status::Found };
                Response::redirect(code, &location)
            }
            Resolution::NotFound => Response::status(Status::NotFound),
        }
    }

    /// Returns the canonical path of `rel` if it is a regular file that
    /// stays inside the root once symlinks are followed.
    async fn probe(&self, rel: &str) -> Option<PathBuf> {
        let candidate = self.root.join(rel);
        let meta = fs::metadata(&candidate).await.ok()?;
        if !meta.is_file() {
            return None;
        }

        let root = fs::canonicalize(&self.root).await.ok()?;
        let real = fs::canonicalize(&candidate).await.ok()?;
        if !real.starts_with(&root) {
            warn!(file = %real.display(), "file outside site root blocked");
            return None;
        }
        Some(real)
    }
}

/// Only plain names: no `..`, no absolute or prefixed components, no NUL.
fn is_plain_relative(name: &str) -> bool {
    !name.contains('\0')
        && Path::new(name).components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
