//! Console Errors
//!
//! Every failure the controller can observe. None of them is fatal to the page.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsoleError {
    /// Fetch threw or the server answered with a non-2xx status
    #[error("network failure: {0}")]
    Network(String),

    /// Server answered `ok: false`
    #[error("{0}")]
    Rejected(String),

    /// Body could not be parsed or the expected fragment is missing
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Persisted sidebar state could not be read
    #[error("stored state unreadable: {0}")]
    Storage(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Action control is missing a required data attribute
    #[error("invalid action control: {0}")]
    InvalidControl(String),
}

impl ConsoleError {
    pub fn http_status(status: u16) -> Self {
        Self::Network(format!("HTTP {status}"))
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
