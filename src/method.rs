//! HTTP method as a typed enum.
//!
//! The site only routes on a handful of methods. Anything else never
//! reaches a handler: the server answers `405 Method Not Allowed` for it.

use std::fmt;
use std::str::FromStr;

/// A method the router can register handlers for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    Get,
    Head,
    Post,
}

impl Method {
    /// Every routable method, in the order used for `allow` headers.
    pub const ALL: [Method; 3] = [Method::Get, Method::Head, Method::Post];

    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get  => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
        }
    }
}

/// Parses an uppercase method string. Case-sensitive per RFC 9110 §9.1.
impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET"  => Ok(Self::Get),
            "HEAD" => Ok(Self::Head),
            "POST" => Ok(Self::Post),
            _      => Err(()),
        }
    }
}

impl TryFrom<&http::Method> for Method {
    type Error = ();

    fn try_from(m: &http::Method) -> Result<Self, Self::Error> {
        m.as_str().parse()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
