//! reqwest-backed transport.

use std::{sync::LazyLock, time::Duration};

use reqwest::Client;
use tracing::instrument;

use crate::{
    config::HttpConfig,
    error::{CaptureError, Result},
    transport::{GatewayTransport, TransportResponse},
};

/// Shared client for transports built with [`HttpTransport::new`].
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(10)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create default HTTP client")
});

/// Rejects header names or values that would allow header injection.
fn validate_header(name: &str, value: &str) -> Result<()> {
    if name.contains(['\r', '\n', '\0']) {
        return Err(CaptureError::Transport(
            "Invalid header name: control characters not allowed".to_owned(),
        ));
    }
    if value.contains(['\r', '\n', '\0']) {
        return Err(CaptureError::Transport(format!(
            "Invalid value for header {name}: control characters not allowed"
        )));
    }
    Ok(())
}

/// HTTP transport using reqwest with connection pooling.
///
/// # Examples
///
/// ```
/// use gocrypto_payum::{config::HttpConfig, transport::HttpTransport};
///
/// let config = HttpConfig { timeout_secs: 5, ..HttpConfig::default() };
/// let transport = HttpTransport::with_config(&config).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with default settings.
    ///
    /// - Pool max idle per host: 10
    /// - Timeout: 30 seconds
    /// - Connect timeout: 10 seconds
    #[must_use]
    pub fn new() -> Self {
        Self { client: DEFAULT_HTTP_CLIENT.clone() }
    }

    /// Creates a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is out of bounds or the client
    /// cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayTransport for HttpTransport {
    #[instrument(skip(self, headers, body), fields(body_len = body.len()))]
    async fn post<'a>(
        &'a self,
        url: &'a str,
        headers: &'a [(&'a str, &'a str)],
        body: &'a [u8],
    ) -> Result<TransportResponse> {
        let mut request = self.client.post(url);

        for &(name, value) in headers {
            validate_header(name, value)?;
            request = request.header(name, value);
        }

        if !body.is_empty() {
            request = request.body(body.to_vec());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(status, "gateway responded");

        Ok(TransportResponse { status, body })
    }
}
