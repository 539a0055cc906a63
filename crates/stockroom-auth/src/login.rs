//! Login flow against the backend.

use crate::token::TokenStore;
use serde::Deserialize;
use stockroom_core::{Error, Result};

const LOGIN_PATH: &str = "/api/v1/login/access-token";

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Form-encoded credential exchange. On failure no token is produced;
    /// the error carries the backend's `detail` message when present.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);
        let form = [("username", username), ("password", password)];

        let res = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !res.status().is_success() {
            let detail = res
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("detail")
                        .and_then(|d| d.as_str().map(str::to_string))
                });
            return Err(Error::Auth(detail.unwrap_or_else(|| {
                "Login failed. Please check your credentials.".to_string()
            })));
        }

        let token: TokenResponse = res
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;
        tracing::debug!(username, "login succeeded");
        Ok(token)
    }
}

/// Clears the stored token. Navigation back to the login surface is the
/// caller's concern.
pub fn logout(store: &TokenStore) -> Result<()> {
    store.clear()
}
