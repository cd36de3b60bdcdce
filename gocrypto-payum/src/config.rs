//! Gateway configuration.
//!
//! This module defines TOML-deserializable configuration for the capture
//! action: credentials, endpoints, capture behavior and HTTP client tuning.
//!
//! # Examples
//!
//! ```toml
//! [credentials]
//! client_id = "shop-client"
//! client_secret_env = "GOCRYPTO_CLIENT_SECRET"
//! host = "shop.example.com"
//! shop_name = "Example Shop"
//! production = true
//!
//! [capture]
//! redirect_style = "post"
//! failure_details = "message_only"
//!
//! [http]
//! timeout_secs = 20
//! ```

use std::{path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::{
    api::{Credentials, Endpoints, GoCryptoApi},
    error::{CaptureError, Result},
    redirect::RedirectStyle,
};

/// Root gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Merchant credentials.
    pub credentials: CredentialsConfig,

    /// Gateway endpoints.
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Capture behavior.
    #[serde(default)]
    pub capture: CaptureOptions,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl GatewayConfig {
    /// Parses and validates configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed or validation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use gocrypto_payum::config::GatewayConfig;
    ///
    /// let config = GatewayConfig::from_toml(r#"
    ///     [credentials]
    ///     client_id = "id"
    ///     client_secret = "secret"
    ///     host = "shop.example.com"
    ///     shop_name = "Example"
    /// "#).unwrap();
    ///
    /// assert!(!config.credentials.production);
    /// ```
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Config` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()?;
        validate_endpoints(&self.endpoints)?;
        self.http.validate()
    }

    /// Builds the API object, resolving the client secret.
    ///
    /// # Errors
    ///
    /// Returns error if the secret's environment variable is not set.
    pub fn api(&self) -> Result<GoCryptoApi> {
        Ok(GoCryptoApi::new(self.credentials.resolve()?, self.endpoints.clone()))
    }
}

/// Credentials as written in configuration.
///
/// The secret is given either inline or through an environment variable.
#[derive(Clone, Deserialize)]
pub struct CredentialsConfig {
    /// Client id.
    pub client_id: String,
    /// Inline client secret.
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Environment variable holding the client secret.
    #[serde(default)]
    pub client_secret_env: Option<String>,
    /// Site host sent as `Site-Host`.
    pub host: String,
    /// Shop name sent with charges.
    pub shop_name: String,
    /// Use the production gateway.
    #[serde(default)]
    pub production: bool,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("client_secret_env", &self.client_secret_env)
            .field("host", &self.host)
            .field("shop_name", &self.shop_name)
            .field("production", &self.production)
            .finish()
    }
}

impl CredentialsConfig {
    /// Validates required fields and the secret source.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Config` if a required field is empty or the
    /// secret source is missing, ambiguous or malformed.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in
            [("client_id", &self.client_id), ("host", &self.host), ("shop_name", &self.shop_name)]
        {
            if value.trim().is_empty() {
                return Err(CaptureError::Config(format!("{field} cannot be empty")));
            }
        }

        match (&self.client_secret, &self.client_secret_env) {
            (Some(_), Some(_)) => Err(CaptureError::Config(
                "set either client_secret or client_secret_env, not both".to_owned(),
            )),
            (None, None) => Err(CaptureError::Config(
                "one of client_secret or client_secret_env is required".to_owned(),
            )),
            (Some(secret), None) if secret.is_empty() => {
                Err(CaptureError::Config("client_secret cannot be empty".to_owned()))
            }
            (None, Some(name)) => validate_env_var_name(name),
            (Some(_), None) => Ok(()),
        }
    }

    /// Resolves the secret and returns runtime credentials.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Config` if the secret cannot be resolved.
    pub fn resolve(&self) -> Result<Credentials> {
        let secret = match (&self.client_secret, &self.client_secret_env) {
            (Some(secret), _) => secret.clone(),
            (None, Some(name)) => std::env::var(name).map_err(|_| {
                CaptureError::Config(format!("environment variable {name} is not set"))
            })?,
            (None, None) => {
                return Err(CaptureError::Config("client secret is not configured".to_owned()));
            }
        };

        Ok(Credentials::new(
            self.client_id.clone(),
            secret,
            self.host.clone(),
            self.shop_name.clone(),
            self.production,
        ))
    }
}

/// Shape of the details persisted when a capture fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureDetails {
    /// The full gateway payload.
    #[default]
    RawPayload,
    /// Only `{"message": ...}` from the gateway payload.
    MessageOnly,
}

/// Capture behavior options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CaptureOptions {
    /// Redirect mechanism for the hosted payment page.
    #[serde(default)]
    pub redirect_style: RedirectStyle,
    /// Shape of failure details.
    #[serde(default)]
    pub failure_details: FailureDetails,
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Maximum idle connections per host.
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: default_pool_max_idle(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl HttpConfig {
    /// Validates timeout bounds.
    ///
    /// # Errors
    ///
    /// Returns error if timeout values are outside valid ranges:
    /// - `timeout_secs`: must be 1-300 seconds
    /// - `connect_timeout_secs`: must be 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(CaptureError::Config("timeout_secs must be between 1 and 300".to_owned()));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(CaptureError::Config(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns timeout as Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns connect timeout as Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_pool_max_idle() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn validate_endpoints(endpoints: &Endpoints) -> Result<()> {
    for (field, value) in
        [("production_url", &endpoints.production_url), ("staging_url", &endpoints.staging_url)]
    {
        let url = Url::parse(value)
            .map_err(|e| CaptureError::Config(format!("invalid {field} '{value}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CaptureError::Config(format!(
                "{field} must use http or https, got: {}",
                url.scheme()
            )));
        }
    }

    for (field, path) in
        [("auth_path", &endpoints.auth_path), ("charge_path", &endpoints.charge_path)]
    {
        if !path.starts_with('/') {
            return Err(CaptureError::Config(format!("{field} must start with '/': {path}")));
        }
        if path.contains("..") || path.contains("//") {
            return Err(CaptureError::Config(format!(
                "{field} contains traversal sequences: {path}"
            )));
        }
    }

    Ok(())
}

/// Validates an environment variable name.
fn validate_env_var_name(name: &str) -> Result<()> {
    let Some(first_char) = name.chars().next() else {
        return Err(CaptureError::Config("environment variable name cannot be empty".to_owned()));
    };

    if !first_char.is_ascii_alphabetic() && first_char != '_' {
        return Err(CaptureError::Config(format!(
            "environment variable name must start with letter or underscore: {name}"
        )));
    }

    if let Some(ch) = name.chars().find(|ch| !ch.is_ascii_alphanumeric() && *ch != '_') {
        return Err(CaptureError::Config(format!(
            "environment variable name contains invalid character '{ch}': {name}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Environment;

    const MINIMAL: &str = r#"
        [credentials]
        client_id = "client"
        client_secret = "secret"
        host = "shop.test"
        shop_name = "Test Shop"
    "#;

    #[test]
    fn test_minimal_config_defaults() {
        let config = GatewayConfig::from_toml(MINIMAL).unwrap();

        assert!(!config.credentials.production);
        assert_eq!(config.endpoints, Endpoints::default());
        assert_eq!(config.capture.redirect_style, RedirectStyle::Get);
        assert_eq!(config.capture.failure_details, FailureDetails::RawPayload);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.http.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            [credentials]
            client_id = "client"
            client_secret = "secret"
            host = "shop.test"
            shop_name = "Test Shop"
            production = true

            [endpoints]
            staging_url = "http://127.0.0.1:8080"
            auth_path = "/v2/auth"

            [capture]
            redirect_style = "post"
            failure_details = "message_only"

            [http]
            timeout_secs = 5
            connect_timeout_secs = 2
            pool_max_idle_per_host = 4
        "#;

        let config = GatewayConfig::from_toml(toml).unwrap();
        assert_eq!(config.endpoints.staging_url, "http://127.0.0.1:8080");
        assert_eq!(config.endpoints.auth_path, "/v2/auth");
        assert_eq!(config.endpoints.charge_path, "/api/charges");
        assert_eq!(config.capture.redirect_style, RedirectStyle::Post);
        assert_eq!(config.capture.failure_details, FailureDetails::MessageOnly);
        assert_eq!(config.http.pool_max_idle_per_host, 4);

        let api = config.api().unwrap();
        assert_eq!(api.environment(), Environment::Production);
        assert_eq!(api.auth_url(), "https://ecommerce.gocrypto.com/v2/auth");
    }

    #[test]
    fn test_empty_client_id_rejected() {
        let toml = MINIMAL.replace("client_id = \"client\"", "client_id = \"\"");
        let err = GatewayConfig::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("client_id cannot be empty"));
    }

    #[test]
    fn test_missing_secret_rejected() {
        let toml = MINIMAL.replace("client_secret = \"secret\"", "");
        let err = GatewayConfig::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("client_secret"));
    }

    #[test]
    fn test_both_secret_sources_rejected() {
        let toml = MINIMAL.replace(
            "client_secret = \"secret\"",
            "client_secret = \"secret\"\nclient_secret_env = \"GOCRYPTO_SECRET\"",
        );
        assert!(matches!(GatewayConfig::from_toml(&toml), Err(CaptureError::Config(_))));
    }

    #[test]
    fn test_invalid_env_var_name_rejected() {
        let toml =
            MINIMAL.replace("client_secret = \"secret\"", "client_secret_env = \"1BAD-NAME\"");
        let err = GatewayConfig::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("environment variable name"));
    }

    #[test]
    fn test_secret_from_env() {
        let name = "GOCRYPTO_PAYUM_TEST_SECRET_FROM_ENV";
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var(name, "env-secret") };

        let toml = MINIMAL
            .replace("client_secret = \"secret\"", &format!("client_secret_env = \"{name}\""));
        let config = GatewayConfig::from_toml(&toml).unwrap();
        let api = config.api().unwrap();
        assert_eq!(api.credentials().client_secret.as_str(), "env-secret");

        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::remove_var(name) };
    }

    #[test]
    fn test_unset_env_secret_fails_on_resolve() {
        let toml = MINIMAL.replace(
            "client_secret = \"secret\"",
            "client_secret_env = \"GOCRYPTO_PAYUM_TEST_SECRET_UNSET\"",
        );
        let config = GatewayConfig::from_toml(&toml).unwrap();
        let err = config.api().unwrap_err();
        assert!(err.to_string().contains("is not set"));
    }

    #[test]
    fn test_invalid_endpoint_url_rejected() {
        let toml = format!("{MINIMAL}\n[endpoints]\nstaging_url = \"not a url\"\n");
        let err = GatewayConfig::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("staging_url"));
    }

    #[test]
    fn test_endpoint_scheme_rejected() {
        let toml = format!("{MINIMAL}\n[endpoints]\nproduction_url = \"ftp://gateway.test\"\n");
        assert!(matches!(GatewayConfig::from_toml(&toml), Err(CaptureError::Config(_))));
    }

    #[test]
    fn test_path_traversal_rejected() {
        let toml = format!("{MINIMAL}\n[endpoints]\ncharge_path = \"/api/../admin\"\n");
        let err = GatewayConfig::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("traversal"));
    }

    #[test]
    fn test_timeout_bounds() {
        let config = HttpConfig { timeout_secs: 301, ..HttpConfig::default() };
        assert!(config.validate().is_err());

        let config = HttpConfig { connect_timeout_secs: 0, ..HttpConfig::default() };
        assert!(config.validate().is_err());

        assert!(HttpConfig::default().validate().is_ok());
    }

    #[test]
    fn test_malformed_toml() {
        let result = GatewayConfig::from_toml("[credentials");
        assert!(matches!(result, Err(CaptureError::ConfigParse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = GatewayConfig::from_file("/nonexistent/gocrypto.toml");
        assert!(matches!(result, Err(CaptureError::Io(_))));
    }

    #[test]
    fn test_debug_redacts_inline_secret() {
        let config = GatewayConfig::from_toml(MINIMAL).unwrap();
        let debug_str = format!("{:?}", config.credentials);
        assert!(!debug_str.contains("\"secret\""));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
