//! Redirect replies handed back to the host platform.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// How the shopper is sent to the hosted payment page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectStyle {
    /// `302 Found` with a `Location` header.
    #[default]
    Get,
    /// An HTML page with an auto-submitting `POST` form.
    Post,
}

/// Instruction to send the shopper elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    /// Destination URL.
    pub url: String,
    /// Redirect mechanism.
    pub style: RedirectStyle,
}

impl Redirect {
    /// Creates a redirect.
    #[must_use]
    pub const fn new(url: String, style: RedirectStyle) -> Self {
        Self { url, style }
    }

    /// HTTP status code the platform should reply with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self.style {
            RedirectStyle::Get => 302,
            RedirectStyle::Post => 200,
        }
    }

    /// Value of the `Location` header, if the style uses one.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self.style {
            RedirectStyle::Get => Some(&self.url),
            RedirectStyle::Post => None,
        }
    }

    /// Response body the platform should reply with.
    ///
    /// `Get` redirects have no body. `Post` redirects render a page whose
    /// form submits itself on load.
    #[must_use]
    pub fn body(&self) -> Option<String> {
        match self.style {
            RedirectStyle::Get => None,
            RedirectStyle::Post => Some(render_post_form(&self.url)),
        }
    }
}

fn render_post_form(url: &str) -> String {
    let mut html = String::with_capacity(256 + url.len());
    html.push_str("<!DOCTYPE html>\n<html>\n<head><title>Redirecting...</title></head>\n");
    html.push_str("<body onload=\"document.forms[0].submit();\">\n");
    // Writing to a String cannot fail.
    let _ = writeln!(html, "<form action=\"{}\" method=\"post\">", escape_attribute(url));
    html.push_str("<p>Redirecting to payment page...</p>\n");
    html.push_str("<noscript><input type=\"submit\" value=\"Continue\"></noscript>\n");
    html.push_str("</form>\n</body>\n</html>\n");
    html
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
