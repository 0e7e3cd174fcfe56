//! Authorization-code login flow.
//!
//! The login itself happens in a browser (credentials plus OTP typed by the
//! operator); this module builds the dialog URL, extracts the code from the
//! pasted redirect URL, and exchanges it for an access token. Unlike
//! market-data calls, a failed exchange is an error: nothing downstream can
//! run without a token.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::url::BASE_URL;

/// Errors from the token exchange.
#[derive(Error, Debug)]
pub enum AuthError {
    /// HTTP request failed.
    #[error("Token exchange failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected the exchange.
    #[error("Token exchange rejected: HTTP {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// Response did not contain a token.
    #[error("Token response could not be parsed: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Builds the browser login-dialog URL.
#[must_use]
pub fn login_url(api_key: &str, redirect_uri: &str) -> String {
    format!(
        "{BASE_URL}/v2/login/authorization/dialog?response_type=code&client_id={api_key}&redirect_uri={redirect_uri}"
    )
}

/// Extracts the authorization code from the redirect URL the operator
/// pasted after logging in.
#[must_use]
pub fn auth_code_from_redirect(redirect: &str) -> Option<String> {
    let parsed = Url::parse(redirect.trim()).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
}

/// Exchanges an authorization code for an access token.
///
/// # Errors
///
/// Returns [`AuthError`] if the request fails, the server rejects the
/// exchange, or the response carries no token.
pub async fn exchange_code(
    api_key: &str,
    api_secret: &str,
    redirect_uri: &str,
    code: &str,
) -> Result<String, AuthError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    let response = client
        .post(format!("{BASE_URL}/v2/login/authorization/token"))
        .form(&[
            ("code", code),
            ("client_id", api_key),
            ("client_secret", api_secret),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::Rejected {
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    let token: TokenResponse = serde_json::from_slice(&body)?;
    Ok(token.access_token)
}
