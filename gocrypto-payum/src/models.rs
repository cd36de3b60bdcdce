//! Wire types for the GoCrypto auth and charge endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Currency of every charge.
pub const CURRENCY: &str = "CHF";
/// Value of the `X-ELI-Locale` header.
pub const LOCALE: &str = "DE";
/// Status value the gateway uses for success.
pub const STATUS_OK: i64 = 1;
/// Query parameter and details key carrying the success token.
pub const SUCCESS_TOKEN_KEY: &str = "success-token";

/// Response of `POST /api/auth`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    /// `1` on success.
    pub status: Option<i64>,
    /// Present on success.
    pub data: Option<AuthData>,
    /// Human-readable explanation.
    pub message: Option<String>,
}

/// Payload of a successful authentication.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthData {
    /// Token for the `X-ELI-Access-Token` header.
    pub access_token: Option<String>,
}

impl AuthResponse {
    /// Returns the access token if the gateway accepted the credentials.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        if self.status != Some(STATUS_OK) {
            return None;
        }
        self.data.as_ref()?.access_token.as_deref()
    }
}

/// Body of `POST /api/charges`.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    /// Shop name from the credentials.
    pub shop_name: String,
    /// Amount to charge.
    pub amount: Amount,
    /// Where the gateway sends the shopper after paying.
    pub return_url: String,
    /// Where the gateway sends the shopper after cancelling.
    pub cancel_url: String,
}

/// Charge amount in major units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Amount {
    /// Total in major units, serialized as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// ISO 4217 currency code.
    pub currency: &'static str,
}

impl Amount {
    /// Converts an order total in minor units (cents) to a CHF amount.
    ///
    /// # Examples
    ///
    /// ```
    /// use gocrypto_payum::models::Amount;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Amount::from_minor_units(1050);
    /// assert_eq!(amount.total, Decimal::new(105, 1));
    /// assert_eq!(amount.currency, "CHF");
    /// ```
    #[must_use]
    pub fn from_minor_units(total: i64) -> Self {
        Self { total: Decimal::new(total, 2).normalize(), currency: CURRENCY }
    }
}

/// Response of `POST /api/charges`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChargeResponse {
    /// `1` on success.
    pub status: Option<i64>,
    /// Present on success.
    pub data: Option<ChargeData>,
    /// Human-readable explanation.
    pub message: Option<String>,
}

/// Payload of a successful charge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChargeData {
    /// Hosted payment page.
    pub redirect_url: Option<String>,
}

impl ChargeResponse {
    /// Returns the hosted payment page if the charge was created.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        if self.status != Some(STATUS_OK) {
            return None;
        }
        self.data.as_ref()?.redirect_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Reads a typed view of a gateway payload.
///
/// Payloads that do not match the expected shape (for example a string
/// `status`) yield the default value, which reports failure.
pub(crate) fn view<T>(payload: &Value) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    T::deserialize(payload).unwrap_or_default()
}

/// Extracts the gateway's `message` field as a details payload.
pub(crate) fn message_only(payload: &Value) -> Value {
    let message = payload.get("message").cloned().unwrap_or(Value::Null);
    serde_json::json!({ "message": message })
}
