//! Notifier trait and webhook implementation

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::notify::error::NotifyError;

/// Trait for delivering a notification message
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Delivers `message` once; no retries
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

/// JSON body posted to the webhook
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Notifier posting `{"text": ...}` to an incoming-webhook endpoint
pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl WebhookNotifier {
    pub fn new(endpoint: Url, user_agent: &str, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&WebhookPayload { text: message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Webhook returned status {}: {}", status, body);
            return Err(NotifyError::Rejected { status, body });
        }

        info!("Webhook accepted notification ({})", status);
        Ok(())
    }
}
