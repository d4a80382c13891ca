use serde::Serialize;

use crate::error::{ClientError, Result};

// ============================================================================
// HTTP Transport
// ============================================================================

/// Thin wrapper over `reqwest` that resolves paths against the server origin
/// and turns non-2xx responses into [`ClientError::Status`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Client for the page the app was served from
    pub fn for_page_origin() -> Self {
        Self::new(page_origin().unwrap_or_default())
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        let body = read_body(response).await?;
        serde_json::from_str(&body).map_err(ClientError::from)
    }

    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<String> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        read_body(response).await
    }

    pub async fn post_empty(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self.client.post(&url).send().await?;
        read_body(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        read_body(response).await
    }
}

async fn read_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        tracing::debug!(status = status.as_u16(), "request failed");
        Err(ClientError::from_status(status.as_u16(), &body))
    }
}

/// Origin of the current page, e.g. `http://localhost:8000`
pub fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}
