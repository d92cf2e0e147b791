//! Post image collection and export.
//!
//! Collection is a read-only pass over a post node. Export turns every
//! image URL into its own tokio task: fetch with `reqwest`, then write
//! under `{year}/{month}/post_{n}_img_{m}.jpg` in the output directory.
//! Tasks are independent. One failed fetch is logged and counted, and
//! never stops the others.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Local, TimeZone};
use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

use crate::dom::PostNode;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::result::ImageBatch;
use crate::url_utils::resolve_src;

/// `src` of every image matching `selector` under `node`, in document order.
///
/// Empty sources are skipped; relative ones are resolved against `base`.
#[must_use]
pub fn collect_images<N: PostNode>(node: &N, selector: &str, base: Option<&Url>) -> Vec<String> {
    node.select_all(selector)
        .iter()
        .filter_map(|img| img.attr("src"))
        .map(|src| resolve_src(&src, base))
        .filter(|src| !src.is_empty())
        .collect()
}

/// Relative path for an exported image.
///
/// `post_index` and `image_index` are 0-based and printed 1-based. Year
/// and month come from `exported_at`, not from the post.
#[must_use]
pub fn image_file_name<Tz: TimeZone>(
    exported_at: &DateTime<Tz>,
    post_index: usize,
    image_index: usize,
) -> PathBuf {
    PathBuf::from(exported_at.year().to_string())
        .join(format!("{:02}", exported_at.month()))
        .join(format!("post_{}_img_{}.jpg", post_index + 1, image_index + 1))
}

/// Outcome of a drained [`ImageExporter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Files written, in completion order.
    pub saved: Vec<PathBuf>,

    /// Images that could not be fetched or written.
    pub failed: usize,
}

#[derive(Debug)]
struct ImageOutcome {
    url: String,
    path: PathBuf,
    result: Result<usize>,
}

/// Work queue of image downloads.
///
/// Submitting spawns onto the current tokio runtime right away, so
/// `export_all` must be called from within one.
#[derive(Debug)]
pub struct ImageExporter {
    client: Client,
    root: PathBuf,
    exported_at: DateTime<Local>,
    limit: Arc<Semaphore>,
    tasks: JoinSet<ImageOutcome>,
}

impl ImageExporter {
    /// Exporter writing under `options.output_dir`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Fetch` if the HTTP client cannot be built.
    pub fn new(options: &Options) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(options.connect_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, options))
    }

    /// Exporter reusing an existing client.
    #[must_use]
    pub fn with_client(client: Client, options: &Options) -> Self {
        Self {
            client,
            root: options.output_dir.clone(),
            exported_at: Local::now(),
            limit: Arc::new(Semaphore::new(options.max_concurrent_downloads.max(1))),
            tasks: JoinSet::new(),
        }
    }

    /// Fix the export time used for the `{year}/{month}` directories.
    #[must_use]
    pub fn exported_at(mut self, at: DateTime<Local>) -> Self {
        self.exported_at = at;
        self
    }

    /// Output directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Queue one download per URL for the post at `post_index`.
    pub fn export_all(&mut self, urls: &[String], post_index: usize) {
        for (image_index, url) in urls.iter().enumerate() {
            let path = self
                .root
                .join(image_file_name(&self.exported_at, post_index, image_index));
            let client = self.client.clone();
            let limit = Arc::clone(&self.limit);
            let url = url.clone();

            debug!(%url, path = %path.display(), "queued image export");
            self.tasks.spawn(async move {
                let result = fetch_and_save(&client, &url, &path, &limit).await;
                ImageOutcome { url, path, result }
            });
        }
    }

    /// Queue every URL of `batch`.
    pub fn export_batch(&mut self, batch: &ImageBatch) {
        self.export_all(&batch.urls, batch.post_index);
    }

    /// Downloads queued and not yet drained.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for every queued download, logging each failure.
    pub async fn finish(mut self) -> ExportSummary {
        let mut summary = ExportSummary::default();

        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(ImageOutcome { url, path, result: Ok(bytes) }) => {
                    debug!(%url, path = %path.display(), bytes, "saved image");
                    summary.saved.push(path);
                }
                Ok(ImageOutcome { url, result: Err(err), .. }) => {
                    warn!(%url, "image export failed: {err}");
                    summary.failed += 1;
                }
                Err(err) => {
                    warn!("image export task failed: {err}");
                    summary.failed += 1;
                }
            }
        }

        if summary.saved.len() + summary.failed > 0 {
            info!(
                "Saved {} images ({} failed) under {}",
                summary.saved.len(),
                summary.failed,
                self.root.display()
            );
        }
        summary
    }
}

async fn fetch_and_save(client: &Client, url: &str, path: &Path, limit: &Semaphore) -> Result<usize> {
    let _permit = limit
        .acquire()
        .await
        .map_err(|e| Error::Task(e.to_string()))?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = response.bytes().await?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }
    tokio::fs::write(path, &bytes)
        .await
        .map_err(|e| Error::io(path, e))?;

    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{self, FixtureNode};
    use crate::url_utils::parse_base;
    use chrono::Utc;

    const IMAGES: &str = ".update-components-image__container img";

    #[test]
    fn collect_images_in_order() {
        let doc = dom::parse(
            r#"<div class="post">
                <img class="avatar" src="https://cdn.example/avatar.jpg">
                <div class="update-components-image__container">
                    <img src="https://cdn.example/one.jpg">
                    <img src="">
                    <img src="https://cdn.example/two.jpg">
                </div>
            </div>"#,
        );
        let root = dom::document_root(&doc);

        assert_eq!(
            collect_images(&root, IMAGES, None),
            vec!["https://cdn.example/one.jpg", "https://cdn.example/two.jpg"]
        );
    }

    #[test]
    fn collect_images_resolves_relative() {
        let node = FixtureNode::new().with_region(IMAGES, FixtureNode::new().with_attr("src", "/media/a.jpg"));
        let base = parse_base("https://www.linkedin.com/feed/");

        assert_eq!(
            collect_images(&node, IMAGES, base.as_ref()),
            vec!["https://www.linkedin.com/media/a.jpg"]
        );
    }

    #[test]
    fn collect_images_none() {
        assert!(collect_images(&FixtureNode::new(), IMAGES, None).is_empty());
    }

    #[test]
    fn image_file_name_uses_export_month() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).single();
        let at = match at {
            Some(at) => at,
            None => panic!("valid date"),
        };

        assert_eq!(image_file_name(&at, 0, 0), PathBuf::from("2024/03/post_1_img_1.jpg"));
        assert_eq!(image_file_name(&at, 4, 2), PathBuf::from("2024/03/post_5_img_3.jpg"));
    }

    #[tokio::test]
    async fn failed_fetch_is_counted_not_fatal() {
        let dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => panic!("tempdir: {e}"),
        };
        let options = Options {
            output_dir: dir.path().to_path_buf(),
            ..Options::default()
        };
        let mut exporter = match ImageExporter::new(&options) {
            Ok(e) => e,
            Err(e) => panic!("client: {e}"),
        };

        // Port 9 (discard) on localhost refuses connections.
        exporter.export_all(&["http://127.0.0.1:9/a.jpg".to_string(), "not a url".to_string()], 0);
        assert_eq!(exporter.pending(), 2);

        let summary = exporter.finish().await;
        assert!(summary.saved.is_empty());
        assert_eq!(summary.failed, 2);
    }
}
