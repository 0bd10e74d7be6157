use crate::model::{FetchedPage, ScraperError};
use crate::scraper::traits::Scraper;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const DETAIL_URL_BASE: &str = "https://chrome.google.com/webstore/detail";

pub struct ScraperImpl {
    client: Client,
    timeout_secs: u64,
}

impl ScraperImpl {
    /// One shared, connection-pooled client for the whole batch. Redirects
    /// are followed by reqwest's default policy.
    pub fn new(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) WebstoreAudit/0.1")
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("❗ Failed to create HTTP client");

        Self {
            client,
            timeout_secs,
        }
    }

    fn build_url(&self, extension_id: &str) -> String {
        format!("{}/{}", DETAIL_URL_BASE, extension_id)
    }
}

#[async_trait::async_trait]
impl Scraper for ScraperImpl {
    async fn fetch(&self, extension_id: &str) -> Result<FetchedPage, ScraperError> {
        let url = self.build_url(extension_id);
        debug!("🔍 Requesting: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                ScraperError::Timeout(self.timeout_secs)
            } else {
                ScraperError::Http(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::BadStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ScraperError::Timeout(self.timeout_secs)
            } else {
                ScraperError::Http(e.to_string())
            }
        })?;

        Ok(FetchedPage {
            body,
            status: status.as_u16(),
        })
    }
}
