// Core structs: ResultRecord, ScrapeStatus, fetch/extract payloads
use serde::{Serialize, Serializer};
use std::path::PathBuf;
use thiserror::Error;

/// Sentinel substituted for any field whose markup is absent or unparsable.
pub const UNKNOWN: &str = "Unknown";

/// One output row per input extension id. Created once, never mutated after
/// the orchestrator assembles it.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    #[serde(rename = "ExtensionId")]
    pub extension_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Ratings")]
    pub ratings: String,
    #[serde(rename = "UserCount")]
    pub user_count: String,
    #[serde(rename = "Status")]
    pub status: ScrapeStatus,
}

impl ResultRecord {
    /// Fresh record with every field at the sentinel and status `ScrapeFailed`,
    /// the state a row is in before its fetch has settled.
    pub fn unknown(extension_id: &str) -> Self {
        Self {
            extension_id: extension_id.to_string(),
            name: UNKNOWN.to_string(),
            ratings: UNKNOWN.to_string(),
            user_count: UNKNOWN.to_string(),
            status: ScrapeStatus::ScrapeFailed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeStatus {
    Scraped,
    ScrapeFailed,
    Error(String),
}

impl std::fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeStatus::Scraped => write!(f, "Scraped"),
            ScrapeStatus::ScrapeFailed => write!(f, "ScrapeFailed"),
            ScrapeStatus::Error(desc) => write!(f, "Error: {}", desc),
        }
    }
}

impl Serialize for ScrapeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Successful fetch outcome: the response body plus the 2xx status it came with.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    pub status: u16,
}

/// Best-effort extraction result. `None` means the element was missing or
/// unusable; the orchestrator substitutes the sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub ratings: Option<String>,
    pub user_count: Option<String>,
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("request failed: {0}")]
    Http(String),
    #[error("request timed out after {0}s")]
    Timeout(u64),
    #[error("unexpected status code {0}")]
    BadStatus(u16),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed csv input: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report row: {0}")]
    Csv(#[from] csv::Error),
}
