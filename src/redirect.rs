//! Return-target sanitizing for the contact form.
//!
//! The form posts a `return_url` the browser is sent back to afterwards.
//! That value is attacker-controlled, so it is reduced to a server-relative
//! path before it is ever used as a `location`.

use std::fmt;

use tracing::{debug, warn};

/// Page used when the requested target is missing or unsafe.
pub const FALLBACK: &str = "/contact";

/// Suffix of the legacy page URLs that clean URLs replace.
pub const PAGE_SUFFIX: &str = ".html";

/// A same-origin path: either [`FALLBACK`] or a string starting with a single
/// `/` that browsers will not read as a host.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReturnTarget(String);

impl ReturnTarget {
    pub fn as_str(&self) -> &str { &self.0 }

    fn fallback() -> Self {
        Self(FALLBACK.to_owned())
    }
}

impl fmt::Display for ReturnTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for ReturnTarget {
    fn default() -> Self { Self::fallback() }
}

/// Maps a legacy `name.html` page file to its clean URL: `index` becomes
/// `/`, everything else `/name`. Returns `None` when `name` lacks the suffix.
pub fn clean_page_url(name: &str) -> Option<String> {
    let clean = name.strip_suffix(PAGE_SUFFIX)?;
    if clean == "index" {
        Some("/".to_owned())
    } else {
        Some(format!("/{clean}"))
    }
}

/// Reduces an untrusted return target to a safe path. Never fails; anything
/// unrecognized becomes [`FALLBACK`].
///
/// Rules, first match wins:
/// 1. empty input → fallback
/// 2. host-changing prefix (`//`, `/\`) → fallback
/// 3. leading `/` → unchanged
/// 4. `name.html` → clean URL of `name`
/// 5. anything else → fallback
pub fn sanitize(raw: &str) -> ReturnTarget {
    if raw.is_empty() {
        return ReturnTarget::fallback();
    }
    if raw.chars().any(|c| c.is_ascii_control()) {
        warn!(return_url = raw, "return target contains control characters");
        return ReturnTarget::fallback();
    }
    if changes_host(raw) {
        warn!(return_url = raw, "protocol-relative return target rejected");
        return ReturnTarget::fallback();
    }
    if raw.starts_with('/') {
        return ReturnTarget(raw.to_owned());
    }
    match clean_page_url(raw) {
        // `\evil.html` would otherwise come out as `/\evil`.
        Some(clean) if !changes_host(&clean) => ReturnTarget(clean),
        _ => {
            debug!(return_url = raw, "unrecognized return target, using fallback");
            ReturnTarget::fallback()
        }
    }
}

/// Browsers treat both `//host` and `/\host` as a scheme-relative URL.
pub(crate) fn changes_host(path: &str) -> bool {
    path.starts_with("//") || path.starts_with("/\\")
}
