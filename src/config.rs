use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input_csv: String,
    pub output_csv: String,
    pub request_timeout_secs: u64,
    /// Upper bound on in-flight requests. `None` fans out one task per
    /// identifier, limited only by the client's connection pool.
    pub max_concurrency: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_csv: "input.csv".to_string(),
            output_csv: "output.csv".to_string(),
            request_timeout_secs: 20,
            max_concurrency: None,
        }
    }
}

/// Loads configuration from `path`, falling back to the built-in defaults
/// when the file does not exist. A file that exists but fails to parse is
/// still an error.
pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
