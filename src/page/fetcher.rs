//! Fetcher trait and HTTP implementation for the announcement page

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};
use url::Url;

use crate::page::error::FetchError;
use crate::page::types::FetchedPage;

/// Trait for retrieving the markup of a page
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at `url`
    ///
    /// # Returns
    /// * `Ok(FetchedPage)` - Body and final URL (after redirects)
    /// * `Err(FetchError)` - Transport failure, timeout or non-success status
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// Page fetcher backed by a reqwest client
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Page returned status {}: {}", status, url);
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let base_url = response.url().clone();
        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), base_url);

        Ok(FetchedPage { base_url, body })
    }
}
