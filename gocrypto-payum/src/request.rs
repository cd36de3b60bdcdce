//! Requests dispatched by the host platform's payment workflow.
//!
//! The platform owns its order and payment records; it exposes them to the
//! action through the [`PaymentContext`] adapter.

use std::fmt;

use serde_json::Value;

/// Host-platform view of a payment being captured.
pub trait PaymentContext: Send {
    /// Order total in minor units (cents).
    fn order_total(&self) -> i64;

    /// URL the shopper returns to after leaving the hosted payment page.
    fn after_url(&self) -> &str;

    /// Details currently stored on the payment.
    fn details(&self) -> &Value;

    /// Replaces the details stored on the payment.
    fn set_details(&mut self, details: Value);
}

/// In-memory payment record.
///
/// # Examples
///
/// ```
/// use gocrypto_payum::request::{Payment, PaymentContext};
///
/// let payment = Payment::new(2500, "https://shop.test/after");
/// assert_eq!(payment.order_total(), 2500);
/// assert!(payment.details().is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    order_total: i64,
    after_url: String,
    details: Value,
}

impl Payment {
    /// Creates a payment with empty details.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructors"
    )]
    pub fn new(order_total: i64, after_url: impl Into<String>) -> Self {
        Self { order_total, after_url: after_url.into(), details: Value::Null }
    }
}

impl PaymentContext for Payment {
    fn order_total(&self) -> i64 {
        self.order_total
    }

    fn after_url(&self) -> &str {
        &self.after_url
    }

    fn details(&self) -> &Value {
        &self.details
    }

    fn set_details(&mut self, details: Value) {
        self.details = details;
    }
}

/// Workflow step being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Collect payment for an order.
    Capture,
    /// Reserve funds without collecting them.
    Authorize,
    /// Return collected funds.
    Refund,
    /// Void a payment.
    Cancel,
    /// Handle an asynchronous gateway notification.
    Notify,
    /// Query the payment's status.
    Status,
}

impl RequestKind {
    /// Returns the request name for logging and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::Authorize => "authorize",
            Self::Refund => "refund",
            Self::Cancel => "cancel",
            Self::Notify => "notify",
            Self::Status => "status",
        }
    }
}

/// Model a request operates on.
pub enum Model<'a> {
    /// A platform payment record.
    Payment(&'a mut dyn PaymentContext),
    /// A bare details object with no backing payment.
    Details(&'a mut Value),
}

impl Model<'_> {
    /// Returns the model name for logging and error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Payment(_) => "payment",
            Self::Details(_) => "details",
        }
    }
}

impl fmt::Debug for Model<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Payment(payment) => f
                .debug_struct("Payment")
                .field("order_total", &payment.order_total())
                .field("after_url", &payment.after_url())
                .finish_non_exhaustive(),
            Self::Details(details) => f.debug_tuple("Details").field(details).finish(),
        }
    }
}

/// A workflow request.
#[derive(Debug)]
pub struct Request<'a> {
    /// Requested step.
    pub kind: RequestKind,
    /// Target model.
    pub model: Model<'a>,
}

impl<'a> Request<'a> {
    /// Creates a request.
    #[must_use]
    pub fn new(kind: RequestKind, model: Model<'a>) -> Self {
        Self { kind, model }
    }

    /// Creates a capture request for a payment.
    #[must_use]
    pub fn capture(payment: &'a mut dyn PaymentContext) -> Self {
        Self::new(RequestKind::Capture, Model::Payment(payment))
    }
}
