//! # contact-relay
//!
//! Serves a small static website under clean, extensionless URLs and relays
//! its contact form to an external email API.
//!
//! - `GET /about` serves `about.html`; `GET /about.html` answers `301` to
//!   `/about`; other paths are served verbatim from the site root or `404`.
//! - `POST /submit-form` validates the form, forwards it to the relay, and
//!   answers `302` back to the page it came from with
//!   `?status=success|error|invalid_form|missing_access_key`.
//!
//! TLS, rate limiting, and slow-client protection belong to the reverse proxy
//! in front of it.
//!
//! ## Running
//!
//! ```rust,no_run
//! use contact_relay::{Config, Server, Site};
//!
//! #[tokio::main]
//! async fn main() -> contact_relay::Result<()> {
//!     let config = Config::from_env()?;
//!     let router = Site::from_config(&config)?.into_router();
//!     Server::bind(config.bind_addr).serve(router).await
//! }
//! ```

mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod error;
pub mod form;
pub mod mime;
pub mod pages;
pub mod query;
pub mod redirect;
pub mod relay;
pub mod site;
pub mod submit;

pub use config::Config;
pub use error::{Error, Result};
pub use method::Method;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::{MAX_BODY_BYTES, Server};
pub use site::Site;
pub use status::Status;
