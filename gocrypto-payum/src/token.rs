//! Success tokens correlating the shopper's return with a capture attempt.

use std::fmt;

use url::Url;
use uuid::Uuid;

use crate::{
    error::{CaptureError, Result},
    models::SUCCESS_TOKEN_KEY,
};

/// Opaque random token embedded in the success return URL.
///
/// 122 random bits from UUID v4, rendered as 32 lowercase hex characters.
#[derive(Clone, PartialEq, Eq)]
pub struct SuccessToken(String);

impl SuccessToken {
    /// Generates a fresh token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `return_url` with `success-token=<token>` appended to its query.
    ///
    /// The rest of `return_url` is kept byte for byte, so it matches the
    /// cancel URL sent alongside it. The pair goes before any fragment.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::InvalidReturnUrl`] if `return_url` is not an
    /// absolute URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use gocrypto_payum::token::SuccessToken;
    ///
    /// let token = SuccessToken::generate();
    /// let url = token.append_to("https://shop.test/after?payum_token=abc").unwrap();
    ///
    /// assert!(url.starts_with("https://shop.test/after?payum_token=abc&success-token="));
    /// assert!(url.ends_with(token.as_str()));
    /// ```
    pub fn append_to(&self, return_url: &str) -> Result<String> {
        parse_return_url(return_url)?;

        let (base, fragment) = match return_url.split_once('#') {
            Some((base, fragment)) => (base, Some(fragment)),
            None => (return_url, None),
        };
        let separator = if !base.contains('?') {
            "?"
        } else if base.ends_with(['?', '&']) {
            ""
        } else {
            "&"
        };

        let mut url = format!("{base}{separator}{SUCCESS_TOKEN_KEY}={}", self.0);
        if let Some(fragment) = fragment {
            url.push('#');
            url.push_str(fragment);
        }
        Ok(url)
    }
}

// Kept out of logs.
impl fmt::Debug for SuccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SuccessToken([REDACTED])")
    }
}

/// Checks that `return_url` is an absolute http(s) URL.
pub(crate) fn parse_return_url(return_url: &str) -> Result<Url> {
    let url = Url::parse(return_url)
        .map_err(|e| CaptureError::InvalidReturnUrl(format!("{return_url}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CaptureError::InvalidReturnUrl(format!(
            "{return_url}: scheme must be http or https"
        )));
    }
    Ok(url)
}
