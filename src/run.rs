//! One complete extraction run: scan, queue image exports, write JSON.
//!
//! The scan is synchronous and finishes (dropping the parsed document)
//! before anything is awaited. Image downloads start as soon as they are
//! queued; the JSON file is written right after the scan without waiting
//! for them, and the run then drains the downloads so none are cut off.

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use crate::assets::{ExportSummary, ImageExporter};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::result::ExtractionRun;
use crate::sink;

/// What a [`harvest`] produced.
#[derive(Debug, Clone)]
pub struct HarvestReport {
    /// Scan output and counters.
    pub run: ExtractionRun,

    /// Path of the JSON export.
    pub json_path: PathBuf,

    /// Image export results; empty when downloads are disabled.
    pub images: ExportSummary,
}

/// Scan a saved feed page and export posts and images under
/// `options.output_dir`.
///
/// Must be called within a tokio runtime. The JSON file is written on the
/// blocking pool so queued downloads keep running meanwhile.
///
/// # Errors
///
/// Returns an error for invalid options or when the JSON export cannot be
/// written. Individual image failures are only logged and counted.
pub async fn harvest(html: &[u8], options: &Options) -> Result<HarvestReport> {
    let run = crate::scan_bytes_with_options(html, options)?;

    let mut exporter = if options.download_images {
        Some(ImageExporter::new(options)?)
    } else {
        None
    };
    if let Some(exporter) = exporter.as_mut() {
        for batch in &run.image_batches {
            exporter.export_batch(batch);
        }
        info!("Exporting {} images", exporter.pending());
    }

    let records = run.records.clone();
    let dir = options.output_dir.clone();
    let date = Utc::now().date_naive();
    let json_path = tokio::task::spawn_blocking(move || sink::emit(&records, &dir, date))
        .await
        .map_err(|e| Error::Task(e.to_string()))??;

    let images = match exporter {
        Some(exporter) => exporter.finish().await,
        None => ExportSummary::default(),
    };

    Ok(HarvestReport {
        run,
        json_path,
        images,
    })
}
