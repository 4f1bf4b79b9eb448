//! Unified error type.

/// The error type returned by the crate's fallible startup operations.
///
/// Request-level failures (bad form, unreachable relay, missing page) are
/// expressed as HTTP [`Response`](crate::Response) values, not as `Error`s.
/// This type covers binding a port, reading configuration, and building the
/// relay client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid {key}: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
