//! Basic authentication token handling.
//!
//! Splunk accepts HTTP basic auth on every REST call. The token is a
//! reversible Base64 encoding of `username:password`, not a hash, so it is
//! kept behind [`SecretString`] and never rendered by `Debug`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{ClientError, Result};

/// Precomputed `Authorization: Basic ...` credentials.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    token: SecretString,
}

impl BasicAuth {
    /// Encode `username:password` into a basic auth token.
    ///
    /// # Errors
    /// Returns [`ClientError::InvalidConfig`] if either credential is empty.
    pub fn new(username: &str, password: &SecretString) -> Result<Self> {
        if username.is_empty() {
            return Err(ClientError::InvalidConfig(
                "username must not be empty".to_string(),
            ));
        }
        if password.expose_secret().is_empty() {
            return Err(ClientError::InvalidConfig(
                "password must not be empty".to_string(),
            ));
        }

        let encoded = STANDARD.encode(format!("{}:{}", username, password.expose_secret()));
        Ok(Self {
            token: SecretString::new(encoded.into()),
        })
    }

    /// The raw Base64 token (without the `Basic ` scheme prefix).
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Build the `Authorization` header value, flagged as sensitive so
    /// reqwest/hyper never print it.
    pub(crate) fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Basic {}", self.token()))
            .map_err(|e| ClientError::InvalidConfig(format!("invalid credentials: {}", e)))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Insert the `Authorization` header into `request`, replacing any
    /// previous value.
    pub(crate) fn apply(&self, request: &mut reqwest::Request) -> Result<()> {
        let value = self.header_value()?;
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}
