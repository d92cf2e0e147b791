//! JSON export of the collected post records.
//!
//! The whole record list is serialized in memory and written with a single
//! call, so a run leaves either the complete file or none.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::{Error, Result};
use crate::result::PostRecord;

/// `linkedin_posts_{YYYY-MM-DD}.json` for `date`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("linkedin_posts_{}.json", date.format("%Y-%m-%d"))
}

/// Pretty-printed JSON array of `records` (two-space indent).
///
/// # Errors
///
/// Returns `Error::Json` if serialization fails.
pub fn to_json(records: &[PostRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Write `records` to `dir/linkedin_posts_{date}.json`, creating `dir`.
///
/// An empty slice writes `[]`.
///
/// # Errors
///
/// Returns `Error::Json` or `Error::Io` when the file cannot be produced.
pub fn emit(records: &[PostRecord], dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let json = to_json(records)?;

    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let path = dir.join(export_file_name(date));
    std::fs::write(&path, json).map_err(|e| Error::io(&path, e))?;

    info!("Wrote {} posts to {}", records.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    #[test]
    fn export_file_name_embeds_date() {
        assert_eq!(export_file_name(date(2024, 1, 5)), "linkedin_posts_2024-01-05.json");
    }

    #[test]
    fn empty_records_serialize_to_empty_array() {
        assert_eq!(to_json(&[]).ok().as_deref(), Some("[]"));
    }

    #[test]
    fn json_is_two_space_indented() {
        let records = vec![PostRecord {
            content: "hello".to_string(),
            images: vec!["https://cdn.example/a.jpg".to_string()],
            ..PostRecord::default()
        }];

        let json = to_json(&records).unwrap_or_default();
        assert!(json.starts_with("[\n  {\n    \"content\": \"hello\""));
        assert!(json.contains("\"datePost\": \"\""));
    }
}
