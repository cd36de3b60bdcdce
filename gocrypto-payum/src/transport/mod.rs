//! Outbound HTTP abstraction.
//!
//! The capture action talks to the gateway through [`GatewayTransport`] so
//! the host platform can inject its own client. [`HttpTransport`] is the
//! default reqwest-backed implementation.
//!
//! A transport reports every HTTP response as a [`TransportResponse`],
//! including non-2xx ones; only failures to obtain a response at all
//! (connection refused, timeout, TLS) are errors.

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use crate::error::Result;

pub mod http;

pub use http::HttpTransport;

/// Response from a transport operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends requests to the gateway.
pub trait GatewayTransport: Send + Sync {
    /// Executes a POST request.
    ///
    /// `body` is sent as-is; an empty slice sends no body.
    ///
    /// # Errors
    ///
    /// Returns error if the request cannot be built or no response is
    /// received.
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [(&'a str, &'a str)],
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;
}
