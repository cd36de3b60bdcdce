//! Gateway credentials and endpoint selection.

use std::fmt;

use serde::Deserialize;
use zeroize::Zeroizing;

/// Production gateway host.
pub const PRODUCTION_URL: &str = "https://ecommerce.gocrypto.com";
/// Staging gateway host.
pub const STAGING_URL: &str = "https://ecommerce.staging.gocrypto.com";
/// Authentication endpoint path.
pub const AUTH_PATH: &str = "/api/auth";
/// Charge creation endpoint path.
pub const CHARGE_PATH: &str = "/api/charges";

/// Gateway environment selected by the credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Live payments.
    Production,
    /// Sandbox payments.
    Staging,
}

impl Environment {
    /// Returns the environment name for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
        }
    }
}

/// Merchant credentials issued by GoCrypto.
///
/// The client secret is wiped from memory on drop and redacted from
/// `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    /// Value of the `X-ELI-Client-Id` header.
    pub client_id: String,
    /// Value of the `X-ELI-Client-Secret` header.
    pub client_secret: Zeroizing<String>,
    /// Value of the `Site-Host` header.
    pub host: String,
    /// Shop name sent with every charge.
    pub shop_name: String,
    /// Use the production gateway instead of staging.
    pub production: bool,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructors"
    )]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        host: impl Into<String>,
        shop_name: impl Into<String>,
        production: bool,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Zeroizing::new(client_secret.into()),
            host: host.into(),
            shop_name: shop_name.into(),
            production,
        }
    }

    /// Returns the environment these credentials belong to.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        if self.production { Environment::Production } else { Environment::Staging }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("host", &self.host)
            .field("shop_name", &self.shop_name)
            .field("production", &self.production)
            .finish()
    }
}

/// Gateway base URLs and endpoint paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Endpoints {
    /// Base URL used when credentials are for production.
    #[serde(default = "default_production_url")]
    pub production_url: String,
    /// Base URL used when credentials are for staging.
    #[serde(default = "default_staging_url")]
    pub staging_url: String,
    /// Authentication path.
    #[serde(default = "default_auth_path")]
    pub auth_path: String,
    /// Charge creation path.
    #[serde(default = "default_charge_path")]
    pub charge_path: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            production_url: default_production_url(),
            staging_url: default_staging_url(),
            auth_path: default_auth_path(),
            charge_path: default_charge_path(),
        }
    }
}

impl Endpoints {
    /// Points both environments at the same base URL.
    ///
    /// Useful for local gateway doubles.
    #[must_use]
    #[allow(
        clippy::impl_trait_in_params,
        reason = "impl Into<String> is idiomatic for constructors"
    )]
    pub fn single(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { production_url: base_url.clone(), staging_url: base_url, ..Self::default() }
    }

    /// Returns the base URL for an environment.
    #[must_use]
    pub fn base_url(&self, environment: Environment) -> &str {
        match environment {
            Environment::Production => &self.production_url,
            Environment::Staging => &self.staging_url,
        }
    }
}

fn default_production_url() -> String {
    PRODUCTION_URL.to_owned()
}

fn default_staging_url() -> String {
    STAGING_URL.to_owned()
}

fn default_auth_path() -> String {
    AUTH_PATH.to_owned()
}

fn default_charge_path() -> String {
    CHARGE_PATH.to_owned()
}

/// API object accepted by [`CaptureAction`](crate::CaptureAction).
///
/// # Examples
///
/// ```
/// use gocrypto_payum::{Credentials, Endpoints, GoCryptoApi};
///
/// let credentials = Credentials::new("id", "secret", "shop.example.com", "Example", true);
/// let api = GoCryptoApi::new(credentials, Endpoints::default());
///
/// assert_eq!(api.auth_url(), "https://ecommerce.gocrypto.com/api/auth");
/// ```
#[derive(Debug, Clone)]
pub struct GoCryptoApi {
    credentials: Credentials,
    endpoints: Endpoints,
}

impl GoCryptoApi {
    /// Creates an API object.
    #[must_use]
    pub const fn new(credentials: Credentials, endpoints: Endpoints) -> Self {
        Self { credentials, endpoints }
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the endpoint configuration.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the environment selected by the credentials.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.credentials.environment()
    }

    /// Returns the full authentication URL.
    #[must_use]
    pub fn auth_url(&self) -> String {
        self.endpoint(&self.endpoints.auth_path)
    }

    /// Returns the full charge creation URL.
    #[must_use]
    pub fn charge_url(&self) -> String {
        self.endpoint(&self.endpoints.charge_path)
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.endpoints.base_url(self.environment()).trim_end_matches('/');
        format!("{base}{path}")
    }
}
