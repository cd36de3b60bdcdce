//! Capture action: authenticate, create a charge, redirect the shopper.

use std::{any::Any, sync::Arc};

use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::{Action, ApiAware, CaptureFailure, CaptureOutcome, Stage};
use crate::{
    api::GoCryptoApi,
    config::{CaptureOptions, FailureDetails},
    error::{CaptureError, Result},
    models::{self, Amount, AuthResponse, ChargeRequest, ChargeResponse, LOCALE, SUCCESS_TOKEN_KEY},
    redirect::Redirect,
    request::{Model, Request, RequestKind},
    token::{self, SuccessToken},
    transport::{GatewayTransport, HttpTransport, TransportResponse},
};

/// Payload of a completed step, or the failure the step ended with.
type StepResult = std::result::Result<Value, (CaptureFailure, Value)>;

/// Collects payment through the GoCrypto hosted payment page.
///
/// Gateway rejections and transport failures never surface as errors; they
/// come back as [`CaptureOutcome::Recorded`] with details to persist.
///
/// # Examples
///
/// ```rust,no_run
/// use gocrypto_payum::{
///     CaptureAction, CaptureOutcome, Credentials, Endpoints, GoCryptoApi,
///     request::{Payment, Request},
///     action::Action,
/// };
///
/// # async fn example() -> gocrypto_payum::Result<()> {
/// let credentials = Credentials::new("id", "secret", "shop.example.com", "Example", false);
/// let api = GoCryptoApi::new(credentials, Endpoints::default());
/// let action = CaptureAction::default().with_api(api);
///
/// let mut payment = Payment::new(2500, "https://shop.example.com/after");
/// match action.execute(Request::capture(&mut payment)).await? {
///     CaptureOutcome::Redirect { redirect, .. } => println!("redirect to {}", redirect.url),
///     CaptureOutcome::Recorded { failure, .. } => println!("capture failed: {failure:?}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CaptureAction<T = HttpTransport> {
    transport: T,
    api: Option<Arc<GoCryptoApi>>,
    options: CaptureOptions,
}

impl Default for CaptureAction<HttpTransport> {
    fn default() -> Self {
        Self::new(HttpTransport::new())
    }
}

impl<T: GatewayTransport> CaptureAction<T> {
    /// Creates an action without an API object.
    ///
    /// Call [`with_api`](Self::with_api) or [`ApiAware::set_api`] before
    /// executing.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport, api: None, options: CaptureOptions::default() }
    }

    /// Sets the API object.
    #[must_use]
    pub fn with_api(mut self, api: GoCryptoApi) -> Self {
        self.api = Some(Arc::new(api));
        self
    }

    /// Sets redirect style and failure detail shape.
    #[must_use]
    pub fn with_options(mut self, options: CaptureOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the capture options.
    #[must_use]
    pub const fn options(&self) -> CaptureOptions {
        self.options
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn api(&self) -> Result<&GoCryptoApi> {
        self.api.as_deref().ok_or_else(|| {
            CaptureError::Config("no API configured; call set_api before executing".to_owned())
        })
    }

    /// Authenticates with the gateway and creates a charge.
    ///
    /// At most two requests are sent; the charge request only after a
    /// successful authentication.
    ///
    /// # Errors
    ///
    /// Returns error only if no API is configured or `return_url` is not an
    /// absolute URL. Both are checked before any request is sent.
    #[instrument(skip(self, return_url), fields(environment = tracing::field::Empty))]
    pub async fn initiate_capture(
        &self,
        order_total: i64,
        return_url: &str,
    ) -> Result<CaptureOutcome> {
        let api = self.api()?;
        token::parse_return_url(return_url)?;
        tracing::Span::current().record("environment", api.environment().as_str());

        let access_token = match self.authenticate(api).await {
            Ok(access_token) => access_token,
            Err((failure, payload)) => return Ok(self.recorded(failure, payload)),
        };

        self.create_charge(api, &access_token, order_total, return_url).await
    }

    async fn authenticate(
        &self,
        api: &GoCryptoApi,
    ) -> std::result::Result<String, (CaptureFailure, Value)> {
        let credentials = api.credentials();
        let url = api.auth_url();
        let headers = [
            ("Content-Type", "application/json"),
            ("X-ELI-Client-Id", credentials.client_id.as_str()),
            ("X-ELI-Client-Secret", credentials.client_secret.as_str()),
            ("Site-Host", credentials.host.as_str()),
        ];

        let payload = read_response(Stage::Auth, self.transport.post(&url, &headers, &[]).await)?;
        let auth: AuthResponse = models::view(&payload);

        match auth.access_token() {
            Some(access_token) => Ok(access_token.to_owned()),
            None => Err((CaptureFailure::Rejected(Stage::Auth), payload)),
        }
    }

    async fn create_charge(
        &self,
        api: &GoCryptoApi,
        access_token: &str,
        order_total: i64,
        return_url: &str,
    ) -> Result<CaptureOutcome> {
        let success_token = SuccessToken::generate();
        let request = ChargeRequest {
            shop_name: api.credentials().shop_name.clone(),
            amount: Amount::from_minor_units(order_total),
            return_url: success_token.append_to(return_url)?,
            cancel_url: return_url.to_owned(),
        };
        let body = serde_json::to_vec(&request).map_err(|e| {
            CaptureError::Transport(format!("charge request serialization failed: {e}"))
        })?;

        let url = api.charge_url();
        let headers = [
            ("Content-Type", "application/json"),
            ("X-ELI-Access-Token", access_token),
            ("X-ELI-Locale", LOCALE),
        ];

        let mut payload =
            match read_response(Stage::Charge, self.transport.post(&url, &headers, &body).await) {
                Ok(payload) => payload,
                Err((failure, payload)) => return Ok(self.recorded(failure, payload)),
            };

        let charge: ChargeResponse = models::view(&payload);
        let redirect_url = charge.redirect_url().map(str::to_owned);

        // The gateway saw this token whether or not it accepted the charge.
        if let Value::Object(map) = &mut payload {
            map.insert(SUCCESS_TOKEN_KEY.to_owned(), success_token.as_str().into());
        }

        let Some(redirect_url) = redirect_url else {
            return Ok(self.recorded(CaptureFailure::Rejected(Stage::Charge), payload));
        };

        info!(style = ?self.options.redirect_style, "charge created, redirecting shopper");

        Ok(CaptureOutcome::Redirect {
            redirect: Redirect::new(redirect_url, self.options.redirect_style),
            details: payload,
        })
    }

    fn recorded(&self, failure: CaptureFailure, payload: Value) -> CaptureOutcome {
        warn!(stage = failure.stage().as_str(), ?failure, "capture failed");

        let details = match self.options.failure_details {
            FailureDetails::RawPayload => payload,
            FailureDetails::MessageOnly => models::message_only(&payload),
        };
        CaptureOutcome::Recorded { failure, details }
    }
}

/// Turns a transport result into the step's JSON payload.
///
/// Non-2xx responses and transport errors are transport failures carrying
/// the response body when it is JSON. A 2xx body that is not JSON is a
/// rejection.
fn read_response(stage: Stage, response: Result<TransportResponse>) -> StepResult {
    match response {
        Ok(response) if response.is_success() => {
            serde_json::from_slice(&response.body).map_err(|e| {
                (
                    CaptureFailure::Rejected(stage),
                    json!({ "message": format!("invalid JSON from gateway: {e}") }),
                )
            })
        }
        Ok(response) => {
            let details = serde_json::from_slice(&response.body).unwrap_or_else(|_| {
                json!({ "message": format!("gateway returned status {}", response.status) })
            });
            Err((CaptureFailure::Transport(stage), details))
        }
        Err(error) => Err((CaptureFailure::Transport(stage), error_details(&error))),
    }
}

/// Describes a request that got no response.
///
/// The message walks the error's source chain; HTTP errors also flag
/// whether the request timed out or never connected.
fn error_details(error: &CaptureError) -> Value {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }

    match error {
        CaptureError::Http(e) => json!({
            "message": message,
            "timeout": e.is_timeout(),
            "connect": e.is_connect(),
        }),
        _ => json!({ "message": message }),
    }
}

impl<T: GatewayTransport> Action for CaptureAction<T> {
    type Outcome = CaptureOutcome;

    fn supports(&self, request: &Request<'_>) -> bool {
        matches!(request, Request { kind: RequestKind::Capture, model: Model::Payment(_) })
    }

    #[instrument(
        skip(self, request),
        fields(kind = request.kind.as_str(), model = request.model.as_str())
    )]
    async fn execute<'a>(&'a self, request: Request<'a>) -> Result<CaptureOutcome> {
        let payment = match request {
            Request { kind: RequestKind::Capture, model: Model::Payment(payment) } => payment,
            other => {
                return Err(CaptureError::UnsupportedRequest(format!(
                    "{} request on {} model",
                    other.kind.as_str(),
                    other.model.as_str()
                )));
            }
        };

        let order_total = payment.order_total();
        let return_url = payment.after_url().to_owned();

        let outcome = self.initiate_capture(order_total, &return_url).await?;
        payment.set_details(outcome.details().clone());

        Ok(outcome)
    }
}

impl<T> ApiAware for CaptureAction<T> {
    fn set_api(&mut self, api: Arc<dyn Any + Send + Sync>) -> Result<()> {
        let api = api.downcast::<GoCryptoApi>().map_err(|_| {
            CaptureError::UnsupportedApi("expected an instance of GoCryptoApi".to_owned())
        })?;
        self.api = Some(api);
        Ok(())
    }
}
