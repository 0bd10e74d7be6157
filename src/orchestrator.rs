// Drives the concurrent fetch-and-extract pipeline over a batch of ids.
use crate::model::{ResultRecord, ScrapeStatus, UNKNOWN};
use crate::parser::Parser;
use crate::scraper::Scraper;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

/// Scrapes every identifier concurrently and returns one record per id, in
/// input order. `join_all` yields positionally, so ordering holds no matter
/// how completions interleave. A failure on one id never touches another.
pub async fn scrape_all<S, P>(
    scraper: &S,
    parser: &P,
    extension_ids: &[String],
    max_concurrency: Option<usize>,
) -> Vec<ResultRecord>
where
    S: Scraper,
    P: Parser + Sync,
{
    let limiter = max_concurrency.map(Semaphore::new);
    let tasks: Vec<_> = extension_ids
        .iter()
        .map(|id| scrape_one(scraper, parser, id, limiter.as_ref()))
        .collect();
    join_all(tasks).await
}

async fn scrape_one<S, P>(
    scraper: &S,
    parser: &P,
    extension_id: &str,
    limiter: Option<&Semaphore>,
) -> ResultRecord
where
    S: Scraper,
    P: Parser + Sync,
{
    // Held until the record is assembled; the semaphore is never closed.
    let _permit = match limiter {
        Some(sem) => sem.acquire().await.ok(),
        None => None,
    };

    let mut record = ResultRecord::unknown(extension_id);
    match scraper.fetch(extension_id).await {
        Ok(page) => {
            debug!(
                "Fetched {} (status {}, {} bytes)",
                extension_id,
                page.status,
                page.body.len()
            );
            let fields = parser.extract(&page.body);
            record.name = fields.name.unwrap_or_else(|| UNKNOWN.to_string());
            record.ratings = fields.ratings.unwrap_or_else(|| UNKNOWN.to_string());
            record.user_count = fields.user_count.unwrap_or_else(|| UNKNOWN.to_string());
            record.status = ScrapeStatus::Scraped;
            info!("✅ Scraped: {} | Name: {}", extension_id, record.name);
        }
        Err(e) => {
            error!("❌ Error scraping {}: {}", extension_id, e);
            record.status = ScrapeStatus::Error(e.to_string());
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExtractedFields, FetchedPage, ScraperError};
    use crate::parser::WebstoreParser;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use tokio::time::{sleep, Duration};

    /// Fake fetcher: serves a minimal detail page per id, with optional
    /// per-id delays and failures, and records completion order.
    struct MockScraper {
        delays_ms: HashMap<String, u64>,
        failing: HashSet<String>,
        completed: Mutex<Vec<String>>,
    }

    impl MockScraper {
        fn new() -> Self {
            Self {
                delays_ms: HashMap::new(),
                failing: HashSet::new(),
                completed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Scraper for MockScraper {
        async fn fetch(&self, extension_id: &str) -> Result<FetchedPage, ScraperError> {
            if let Some(&ms) = self.delays_ms.get(extension_id) {
                sleep(Duration::from_millis(ms)).await;
            }
            self.completed
                .lock()
                .unwrap()
                .push(extension_id.to_string());
            if self.failing.contains(extension_id) {
                return Err(ScraperError::BadStatus(500));
            }
            Ok(FetchedPage {
                body: format!(
                    "<html><head><title>Ext {extension_id} - Chrome Web Store</title></head>\
                     <body><p class=\"xJEoWe\">4.2</p>\
                     <div class=\"F9iKBc\">1,000 users</div></body></html>"
                ),
                status: 200,
            })
        }
    }

    /// Parser stub so orchestrator tests can run without real markup.
    struct FixedParser(ExtractedFields);

    impl Parser for FixedParser {
        fn extract(&self, _html: &str) -> ExtractedFields {
            self.0.clone()
        }
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{:032}", i)).collect()
    }

    #[tokio::test]
    async fn one_record_per_id_in_input_order() {
        let input = ids(5);
        let mut scraper = MockScraper::new();
        // First id resolves last; output order must not care.
        scraper.delays_ms.insert(input[0].clone(), 80);
        scraper.delays_ms.insert(input[1].clone(), 40);

        let records = scrape_all(&scraper, &WebstoreParser::new(), &input, None).await;

        assert_eq!(records.len(), input.len());
        let out: Vec<_> = records.iter().map(|r| r.extension_id.clone()).collect();
        assert_eq!(out, input);

        let completed = scraper.completed.lock().unwrap();
        assert_ne!(*completed, input, "delays should reorder completions");
    }

    #[tokio::test]
    async fn failed_fetch_yields_error_status_and_unknown_fields() {
        let input = ids(3);
        let mut scraper = MockScraper::new();
        scraper.failing.insert(input[1].clone());

        let records = scrape_all(&scraper, &WebstoreParser::new(), &input, None).await;

        assert_eq!(records[1].status.to_string(), "Error: unexpected status code 500");
        assert_eq!(records[1].name, UNKNOWN);
        assert_eq!(records[1].ratings, UNKNOWN);
        assert_eq!(records[1].user_count, UNKNOWN);
        // Neighbours are untouched by the failure.
        assert_eq!(records[0].status, ScrapeStatus::Scraped);
        assert_eq!(records[2].status, ScrapeStatus::Scraped);
        assert_eq!(records[0].user_count, "1000");
    }

    #[tokio::test]
    async fn missing_fields_fall_back_to_the_sentinel() {
        let input = ids(1);
        let scraper = MockScraper::new();
        let parser = FixedParser(ExtractedFields {
            name: Some("Foo".into()),
            ratings: None,
            user_count: None,
        });

        let records = scrape_all(&scraper, &parser, &input, None).await;

        assert_eq!(records[0].status, ScrapeStatus::Scraped);
        assert_eq!(records[0].name, "Foo");
        assert_eq!(records[0].ratings, UNKNOWN);
        assert_eq!(records[0].user_count, UNKNOWN);
    }

    #[tokio::test]
    async fn bounded_concurrency_still_preserves_order() {
        let input = ids(6);
        let mut scraper = MockScraper::new();
        scraper.delays_ms.insert(input[0].clone(), 30);

        let records = scrape_all(&scraper, &WebstoreParser::new(), &input, Some(2)).await;

        let out: Vec<_> = records.iter().map(|r| r.extension_id.clone()).collect();
        assert_eq!(out, input);
        assert!(records.iter().all(|r| r.status == ScrapeStatus::Scraped));
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let scraper = MockScraper::new();
        let records = scrape_all(&scraper, &WebstoreParser::new(), &[], None).await;
        assert!(records.is_empty());
    }
}
