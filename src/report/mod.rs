// Report writer: serializes result records to the output CSV.
use crate::model::{ReportError, ResultRecord};
use csv::Writer;
use std::path::Path;

/// Writes the header plus one row per record, in the order given. No
/// filtering, no reordering.
pub fn write_report(path: &Path, records: &[ResultRecord]) -> Result<(), ReportError> {
    let mut writer = Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
