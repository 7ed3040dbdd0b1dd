//! Unified error type for the SDK.

use std::fmt::Display;

use thiserror::Error;

/// Top-level error type returned by every fallible SDK operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be resolved, read, or parsed.
    #[error("config: {0}")]
    Config(String),

    /// The blockchain identifier is not one of the compiled-in chain families.
    #[error("unsupported blockchain: {0}")]
    UnsupportedBlockchain(String),

    /// No wallet adapter is registered under the requested name.
    #[error("wallet adapter not found: {0}")]
    WalletNotFound(String),

    /// The request never produced an HTTP response (connect, TLS, timeout).
    #[error("transport: {0}")]
    Transport(String),

    /// The server answered with a non-success status code.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, lossily decoded as UTF-8.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("decode: {0}")]
    Decode(String),

    /// A value could not be serialised for output.
    #[error("encode: {0}")]
    Encode(String),
}

impl Error {
    /// Shorthand for [`Error::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// [`Error::Config`] with the underlying cause appended.
    pub fn config_with(msg: impl Display, source: impl Display) -> Self {
        Self::Config(format!("{msg}: {source}"))
    }

    /// [`Error::Transport`] with the underlying cause appended.
    pub fn transport_with(msg: impl Display, source: impl Display) -> Self {
        Self::Transport(format!("{msg}: {source}"))
    }
}
