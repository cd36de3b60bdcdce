//! Payment workflow actions.
//!
//! An action declares which requests it handles ([`Action::supports`]) and
//! runs them ([`Action::execute`]). Actions that need gateway credentials
//! also implement [`ApiAware`], which the platform calls once at setup.

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::{any::Any, sync::Arc};

use serde::Serialize;
use serde_json::Value;

use crate::{error::Result, redirect::Redirect, request::Request};

pub mod capture;
#[cfg(test)]
mod proptest_capture;
#[cfg(test)]
pub(crate) mod recording;

pub use capture::CaptureAction;

/// A step of the payment workflow.
pub trait Action: Send + Sync {
    /// Value returned for handled requests.
    type Outcome;

    /// Returns `true` if this action handles `request`.
    fn supports(&self, request: &Request<'_>) -> bool;

    /// Runs the action.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::UnsupportedRequest`](crate::CaptureError::UnsupportedRequest)
    /// when [`supports`](Self::supports) is `false` for `request`.
    fn execute<'a>(
        &'a self,
        request: Request<'a>,
    ) -> impl Future<Output = Result<Self::Outcome>> + Send + 'a;
}

/// Actions configured with a gateway API object.
pub trait ApiAware {
    /// Sets the API object.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::UnsupportedApi`](crate::CaptureError::UnsupportedApi)
    /// if `api` is not the type the action expects.
    fn set_api(&mut self, api: Arc<dyn Any + Send + Sync>) -> Result<()>;
}

/// Gateway step a capture reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// `POST /api/auth`.
    Auth,
    /// `POST /api/charges`.
    Charge,
}

impl Stage {
    /// Returns the stage name for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Charge => "charge",
        }
    }
}

/// Why a capture did not end in a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "stage", rename_all = "snake_case")]
pub enum CaptureFailure {
    /// The gateway answered but reported failure.
    Rejected(Stage),
    /// No usable answer: non-2xx status, connection failure or timeout.
    Transport(Stage),
}

impl CaptureFailure {
    /// Returns the stage the failure happened at.
    #[must_use]
    pub const fn stage(self) -> Stage {
        match self {
            Self::Rejected(stage) | Self::Transport(stage) => stage,
        }
    }
}

/// Result of a capture attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CaptureOutcome {
    /// Send the shopper to the hosted payment page.
    Redirect {
        /// Where and how to redirect.
        redirect: Redirect,
        /// Charge payload with the success token attached.
        details: Value,
    },
    /// The attempt failed; the shopper stays on the payment page.
    Recorded {
        /// Failure cause.
        failure: CaptureFailure,
        /// Gateway payload explaining the failure.
        details: Value,
    },
}

impl CaptureOutcome {
    /// Details to persist on the payment.
    #[must_use]
    pub const fn details(&self) -> &Value {
        match self {
            Self::Redirect { details, .. } | Self::Recorded { details, .. } => details,
        }
    }

    /// Consumes the outcome, returning its details.
    #[must_use]
    pub fn into_details(self) -> Value {
        match self {
            Self::Redirect { details, .. } | Self::Recorded { details, .. } => details,
        }
    }

    /// Returns the redirect, if any.
    #[must_use]
    pub const fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Redirect { redirect, .. } => Some(redirect),
            Self::Recorded { .. } => None,
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<CaptureFailure> {
        match self {
            Self::Redirect { .. } => None,
            Self::Recorded { failure, .. } => Some(*failure),
        }
    }
}
