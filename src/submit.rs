//! The `POST /submit-form` flow.
//!
//! Every submission ends in a `302` back to a sanitized return target with a
//! single `status` query parameter describing what happened:
//!
//! ```text
//! return_url ─ sanitize ─┬─ no access key ──────────────► missing_access_key
//!                        └─ validate ─┬─ missing field ──► invalid_form
//!                                     └─ forward ─┬─ ok ─► success
//!                                                 └────► error
//! ```

use std::fmt;

use tracing::{debug, warn};

use crate::form::{FormFields, validate};
use crate::query::append_param;
use crate::redirect::{ReturnTarget, sanitize};
use crate::relay::{AccessKey, Relay};
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// Name of the query parameter carrying the outcome.
pub const STATUS_PARAM: &str = "status";

/// Outcome reported back to the visitor's browser.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitStatus {
    Success,
    Error,
    InvalidForm,
    MissingAccessKey,
}

impl SubmitStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success          => "success",
            Self::Error            => "error",
            Self::InvalidForm      => "invalid_form",
            Self::MissingAccessKey => "missing_access_key",
        }
    }
}

impl fmt::Display for SubmitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the browser goes next and why.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Outcome {
    pub target: ReturnTarget,
    pub status: SubmitStatus,
}

impl Outcome {
    /// The return target with `status` set.
    pub fn location(&self) -> String {
        append_param(self.target.as_str(), STATUS_PARAM, self.status.as_str())
    }
}

/// A `302 Found` to [`Outcome::location`].
impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        Response::redirect(Status::Found, &self.location())
    }
}

/// Validates submissions and hands them to a [`Relay`].
#[derive(Debug)]
pub struct SubmitHandler<R> {
    access_key: Option<AccessKey>,
    relay: R,
}

impl<R: Relay> SubmitHandler<R> {
    pub fn new(access_key: Option<AccessKey>, relay: R) -> Self {
        Self { access_key, relay }
    }

    pub fn relay(&self) -> &R { &self.relay }

    /// Runs one submission. Never fails: every path yields an [`Outcome`].
    pub async fn handle(&self, fields: &FormFields) -> Outcome {
        let target = sanitize(fields.get("return_url").unwrap_or_default());

        let Some(key) = &self.access_key else {
            warn!("form submitted but no relay access key is configured");
            return Outcome { target, status: SubmitStatus::MissingAccessKey };
        };

        let submission = match validate(fields) {
            Ok(submission) => submission,
            Err(e) => {
                debug!("rejected submission: {e}");
                return Outcome { target, status: SubmitStatus::InvalidForm };
            }
        };

        let status = if self.relay.forward(key, &submission).await.is_success() {
            SubmitStatus::Success
        } else {
            SubmitStatus::Error
        };
        Outcome { target, status }
    }
}
