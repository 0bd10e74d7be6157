mod config;
mod model;
mod orchestrator;
mod parser;
mod report;
mod scraper;
mod source;

use crate::config::{load_config, AppConfig};
use crate::model::ScrapeStatus;
use crate::parser::WebstoreParser;
use crate::scraper::ScraperImpl;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from file (built-in defaults if absent)
    let config: AppConfig = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("🚫 {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Everything after configuration: read ids, scrape, write the report.
/// Returns Ok without producing an output file when no id survives the
/// filter; per-id scrape failures surface only in the Status column and
/// never become an error here.
async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let extension_ids = source::read_extension_ids(Path::new(&config.input_csv))?;

    info!(
        "📦 Found {} valid extension IDs: {:?}",
        extension_ids.len(),
        extension_ids
    );
    if extension_ids.is_empty() {
        warn!("🚫 No valid extension IDs found. Exiting.");
        return Ok(());
    }

    let fetcher = ScraperImpl::new(config.request_timeout_secs);
    let extractor = WebstoreParser::new();

    let records = orchestrator::scrape_all(
        &fetcher,
        &extractor,
        &extension_ids,
        config.max_concurrency,
    )
    .await;

    let failed = records
        .iter()
        .filter(|r| !matches!(r.status, ScrapeStatus::Scraped))
        .count();
    info!(
        "Scraped {} of {} extensions ({} failed)",
        records.len() - failed,
        records.len(),
        failed
    );

    report::write_report(Path::new(&config.output_csv), &records)?;
    info!("✅ Finished. Output saved to: {}", config.output_csv);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceError;
    use std::fs;

    fn config_in(dir: &Path) -> AppConfig {
        AppConfig {
            input_csv: dir.join("input.csv").to_str().unwrap().to_string(),
            output_csv: dir.join("output.csv").to_str().unwrap().to_string(),
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn all_invalid_input_exits_cleanly_with_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        fs::write(
            &config.input_csv,
            "ExtensionId\ntoo-short\nccccccccccccccccccccccccccccccccc\n",
        )
        .unwrap();

        run(config.clone()).await.unwrap();

        assert!(
            !Path::new(&config.output_csv).exists(),
            "an empty id batch must not produce an output file"
        );
    }

    #[tokio::test]
    async fn missing_input_file_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let err = run(config.clone()).await.unwrap_err();

        assert!(err.downcast_ref::<SourceError>().is_some());
        assert!(!Path::new(&config.output_csv).exists());
    }
}
