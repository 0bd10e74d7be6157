use crate::model::{FetchedPage, ScraperError};

#[async_trait::async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch(&self, extension_id: &str) -> Result<FetchedPage, ScraperError>;
}
