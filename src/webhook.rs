use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};

/// One POST to a webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    pub url: String,
    pub body: serde_json::Value,
}

/// What the destination answered: status code plus body text.
#[derive(Debug, Clone)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    /// Any 2xx counts as delivered.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport seam — implement to swap out or fake the wire.
///
/// An `Err` means the request never produced an HTTP response (connect
/// failure, timeout); a non-2xx response comes back as `Ok` and is classified
/// by the caller.
pub trait WebhookSender: Send + Sync {
    fn send<'a>(
        &'a self,
        request: &'a WebhookRequest,
    ) -> Pin<Box<dyn Future<Output = Result<WebhookResponse>> + Send + 'a>>;
}

/// Production sender backed by a shared `reqwest` client.
pub struct HttpWebhookSender {
    client: reqwest::Client,
}

impl Default for HttpWebhookSender {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpWebhookSender {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl WebhookSender for HttpWebhookSender {
    fn send<'a>(
        &'a self,
        request: &'a WebhookRequest,
    ) -> Pin<Box<dyn Future<Output = Result<WebhookResponse>> + Send + 'a>> {
        Box::pin(async move {
            let response = self
                .client
                .post(&request.url)
                .json(&request.body)
                .send()
                .await
                .context("send webhook request")?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));

            Ok(WebhookResponse { status, body })
        })
    }
}
