//! Error types for the GoCrypto capture action.
//!
//! Only setup problems and unsupported requests are reported as errors.
//! Gateway rejections and transport failures during a capture are turned
//! into data (see [`CaptureOutcome`](crate::CaptureOutcome)) so the caller
//! always has details to persist.
//!
//! # Error Categories
//!
//! - **Dispatch Errors** ([`CaptureError::UnsupportedRequest`]): the request is not a capture
//!   for a payment model
//! - **Setup Errors** ([`CaptureError::UnsupportedApi`], [`CaptureError::Config`],
//!   [`CaptureError::ConfigParse`], [`CaptureError::Io`]): wiring or configuration problems
//! - **Input Errors** ([`CaptureError::InvalidReturnUrl`]): the platform handed over a bad URL
//! - **Network Errors** ([`CaptureError::Http`], [`CaptureError::Transport`]): raised by the
//!   transport, absorbed by the action
//!
//! # Examples
//!
//! ```
//! use gocrypto_payum::error::{CaptureError, Result};
//!
//! fn require_shop_name(name: &str) -> Result<&str> {
//!     if name.is_empty() {
//!         return Err(CaptureError::Config("shop_name cannot be empty".to_owned()));
//!     }
//!     Ok(name)
//! }
//!
//! assert!(require_shop_name("").is_err());
//! ```

use thiserror::Error;

/// Result type alias for capture operations.
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors that can occur while wiring or running the capture action.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The request is not one this action handles.
    ///
    /// Raised by [`Action::execute`](crate::action::Action::execute) before any
    /// network activity when [`Action::supports`](crate::action::Action::supports)
    /// returns `false`.
    #[error("Request not supported: {0}")]
    UnsupportedRequest(String),

    /// The action was given an API object of the wrong type.
    ///
    /// # Recovery
    ///
    /// Wire the action with a [`GoCryptoApi`](crate::GoCryptoApi).
    #[error("Unsupported API: {0}")]
    UnsupportedApi(String),

    /// Configuration is invalid or incomplete.
    ///
    /// Covers missing credentials, malformed endpoint URLs, out-of-range
    /// timeouts and running a capture before an API was set.
    #[error("Invalid gateway configuration: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("Failed to parse gateway configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("Failed to read gateway configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The return URL supplied by the platform is not an absolute URL.
    #[error("Invalid return URL: {0}")]
    InvalidReturnUrl(String),

    /// HTTP request to the gateway failed.
    ///
    /// Wraps [`reqwest::Error`]: connection refused, DNS failure, TLS
    /// errors and timeouts.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request could not be built by the transport.
    #[error("Transport error: {0}")]
    Transport(String),
}
