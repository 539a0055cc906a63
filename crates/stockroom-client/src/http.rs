//! Shared HTTP plumbing for the resource clients.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use stockroom_core::{Error, Page, Result};

const API_PREFIX: &str = "/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire envelope for list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: u64,
}

impl<T> ListResponse<T> {
    pub fn into_page(self) -> Page<T> {
        Page::new(self.data, self.count)
    }
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, path);
        let mut req = self.http.request(method, &url).timeout(REQUEST_TIMEOUT);

        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        req
    }

    pub(crate) async fn send(req: RequestBuilder) -> Result<Response> {
        let res = req.send().await.map_err(|e| Error::Network(e.to_string()))?;
        Self::check(res).await
    }

    pub(crate) async fn json<T: DeserializeOwned>(res: Response) -> Result<T> {
        res.json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    async fn check(res: Response) -> Result<Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        match status {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::NOT_FOUND => Err(Error::NotFound(
                error_detail(res)
                    .await
                    .unwrap_or_else(|| "Not found".to_string()),
            )),
            _ => Err(Error::Remote(
                error_detail(res)
                    .await
                    .unwrap_or_else(|| status.to_string()),
            )),
        }
    }
}

/// Extracts the `detail` field of an error body, if one is present.
async fn error_detail(res: Response) -> Option<String> {
    let body: serde_json::Value = res.json().await.ok()?;
    match body.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
