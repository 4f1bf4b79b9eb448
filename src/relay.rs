//! Forwarding of validated submissions to the external email relay.
//!
//! One POST per submission, form-encoded, bounded by [`RELAY_TIMEOUT`], never
//! retried. Whatever happens on the wire, the caller gets a
//! [`ForwardOutcome`] back.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::Url;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::Result;
use crate::form::FormSubmission;

/// Time allowed for the whole relay exchange, connect to last body byte.
pub const RELAY_TIMEOUT: Duration = Duration::from_secs(15);

pub const DEFAULT_RELAY_URL: &str = "https://api.web3forms.com/submit";

/// The relay API secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKey(String);

impl AccessKey {
    /// Trims `raw`; blank input is no key at all.
    pub fn new(raw: &str) -> Option<Self> {
        let key = raw.trim();
        (!key.is_empty()).then(|| Self(key.to_owned()))
    }

    pub fn expose(&self) -> &str { &self.0 }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessKey(****)")
    }
}

/// Result of one relay attempt. The text is diagnostic only and never shown
/// to the visitor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForwardOutcome {
    Success { message: String },
    Failure { reason: String },
}

impl ForwardOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Something that can deliver a submission. Implementations must be total:
/// every failure is reported as [`ForwardOutcome::Failure`].
pub trait Relay: Send + Sync {
    fn forward(
        &self,
        key: &AccessKey,
        submission: &FormSubmission,
    ) -> impl Future<Output = ForwardOutcome> + Send;
}

/// Form pairs sent to the relay. Optional fields are left out entirely when
/// the submission has none.
pub fn relay_payload<'a>(key: &'a AccessKey, submission: &'a FormSubmission) -> Vec<(&'static str, &'a str)> {
    let mut pairs = vec![
        ("access_key", key.expose()),
        ("name", submission.name.as_str()),
        ("email", submission.email.as_str()),
        ("message", submission.message.as_str()),
    ];
    if let Some(subject) = &submission.subject {
        pairs.push(("subject", subject.as_str()));
    }
    if let Some(company) = &submission.company {
        pairs.push(("company", company.as_str()));
    }
    pairs
}

/// The production relay: an HTTP endpoint answering
/// `{"success": bool, "message": string}`.
#[derive(Clone, Debug)]
pub struct HttpRelay {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpRelay {
    pub fn new(endpoint: Url) -> Result<Self> {
        Self::with_timeout(endpoint, RELAY_TIMEOUT)
    }

    pub fn with_timeout(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url { &self.endpoint }

    async fn send(&self, key: &AccessKey, submission: &FormSubmission) -> reqwest::Result<RelayReply> {
        self.client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .form(&relay_payload(key, submission))
            .send()
            .await?
            .error_for_status()?
            .json::<RelayReply>()
            .await
    }
}

impl Relay for HttpRelay {
    async fn forward(&self, key: &AccessKey, submission: &FormSubmission) -> ForwardOutcome {
        let outcome = match self.send(key, submission).await {
            Ok(reply) => reply.into_outcome(),
            Err(e) => ForwardOutcome::Failure { reason: e.to_string() },
        };
        match &outcome {
            ForwardOutcome::Success { message } => info!(relay_message = %message, "submission relayed"),
            ForwardOutcome::Failure { reason } => warn!(%reason, "relay did not accept submission"),
        }
        outcome
    }
}

/// The relay's JSON reply. Anything but an object is malformed.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct RelayReply(Map<String, Value>);

impl RelayReply {
    fn into_outcome(mut self) -> ForwardOutcome {
        let message = match self.0.remove("message") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        };
        if self.0.get("success").is_some_and(truthy) {
            ForwardOutcome::Success { message }
        } else if message.is_empty() {
            ForwardOutcome::Failure { reason: "relay reported failure".to_owned() }
        } else {
            ForwardOutcome::Failure { reason: message }
        }
    }
}

/// JSON truthiness: `null`, `false`, zero, and empty strings, arrays and
/// objects are false.
fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
