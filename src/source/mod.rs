// Identifier source: reads and filters extension ids from the input CSV.
use crate::model::SourceError;
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

/// Extension ids are opaque 32-character tokens; anything else is noise.
const EXTENSION_ID_LEN: usize = 32;

/// Recognized header spellings, checked in order, exact match only.
const ID_COLUMNS: [&str; 2] = ["ExtensionId", "extensionid"];

/// Reads the input CSV and returns every value from the id column that is
/// exactly 32 characters long after trimming. Row order is preserved and
/// duplicates are kept; malformed rows are skipped silently. A missing file
/// is the only fatal condition.
pub fn read_extension_ids(path: &Path) -> Result<Vec<String>, SourceError> {
    if !path.exists() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();
    let id_columns: Vec<usize> = ID_COLUMNS
        .iter()
        .filter_map(|name| headers.iter().position(|h| h == *name))
        .collect();

    let mut ids = Vec::new();
    for row in reader.records() {
        let row = match row {
            Ok(r) => r,
            Err(e) => {
                debug!("Skipping unreadable row: {}", e);
                continue;
            }
        };
        debug!("📝 Raw input row: {:?}", row);

        // Per-row fallback: an empty primary column defers to the next spelling.
        let raw = id_columns
            .iter()
            .find_map(|&col| row.get(col).filter(|value| !value.is_empty()));
        let Some(raw) = raw else { continue };
        let id = raw.trim();
        if id.chars().count() == EXTENSION_ID_LEN {
            ids.push(id.to_string());
        } else {
            debug!("Rejected id with length {}: {:?}", id.chars().count(), id);
        }
    }
    Ok(ids)
}
