//! GoCrypto capture action for Payum-style payment workflows.
//!
//! This crate collects payment for an order through the GoCrypto hosted
//! payment page. A capture is two sequential HTTP calls:
//!
//! 1. `POST /api/auth` with the merchant's client id, client secret and site
//!    host, yielding an access token
//! 2. `POST /api/charges` with the order amount in CHF and return URLs,
//!    yielding the hosted page to redirect the shopper to
//!
//! The second call is only made when the first succeeds. Neither call is
//! retried.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ Host platform   │  order/payment records, return URL
//! └────────┬────────┘
//!          │ Request::capture(&mut payment)
//! ┌────────▼────────────────────────────────┐
//! │ CaptureAction (this crate)              │
//! │  supports / execute / set_api           │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │ GoCryptoApi  │  │ GatewayTransport│  │
//! │  │ credentials, │  │ (reqwest)       │  │
//! │  │ endpoints    │  │                 │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └────────┬────────────────────────────────┘
//!          │ HTTPS
//! ┌────────▼────────┐
//! │ GoCrypto gateway│
//! └─────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gocrypto_payum::{
//!     CaptureAction, CaptureOutcome, GatewayConfig,
//!     action::Action,
//!     request::{Payment, Request},
//!     transport::HttpTransport,
//! };
//!
//! # async fn example() -> gocrypto_payum::Result<()> {
//! let config = GatewayConfig::from_file("gocrypto.toml")?;
//! let action = CaptureAction::new(HttpTransport::with_config(&config.http)?)
//!     .with_api(config.api()?)
//!     .with_options(config.capture);
//!
//! let mut payment = Payment::new(2500, "https://shop.example.com/payment/after?payum_token=abc");
//! match action.execute(Request::capture(&mut payment)).await? {
//!     CaptureOutcome::Redirect { redirect, .. } => {
//!         // Reply with redirect.status_code(), redirect.location(), redirect.body()
//!         println!("send shopper to {}", redirect.url);
//!     }
//!     CaptureOutcome::Recorded { failure, details } => {
//!         // Details are already stored on the payment.
//!         println!("capture failed at {:?}: {details}", failure.stage());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`action`]: the `Action`/`ApiAware` traits and [`CaptureAction`]
//! - [`api`]: credentials, environments and endpoint selection
//! - [`config`]: TOML configuration
//! - [`models`]: gateway wire types
//! - [`redirect`]: redirect replies (302 or auto-submitting form)
//! - [`request`]: workflow requests and the host-platform payment adapter
//! - [`token`]: success tokens for return correlation
//! - [`transport`]: HTTP abstraction and the reqwest implementation
//! - [`error`]: error types
//!
//! # Security Considerations
//!
//! - The client secret is zeroized on drop and redacted from `Debug`
//! - Secrets, access tokens and success tokens are never logged
//! - Header values are checked for CR/LF injection before sending

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest and mockito"
)]

pub mod action;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod redirect;
pub mod request;
pub mod token;
pub mod transport;

pub use action::{CaptureAction, CaptureFailure, CaptureOutcome, Stage};
pub use api::{Credentials, Endpoints, Environment, GoCryptoApi};
pub use config::GatewayConfig;
pub use error::{CaptureError, Result};
