//! Command-line trigger: extract original posts from a saved feed page.
//!
//! Reads the page from a file (or stdin with `-`), writes
//! `linkedin_posts_{date}.json` and the post images into the output
//! directory.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rs_feedposts::{harvest, Options};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "extract-posts", version, about = "Extract original posts from a saved feed page")]
struct Cli {
    /// Saved HTML page, or `-` for stdin
    input: PathBuf,

    /// TOML file overriding options and selectors
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the JSON file and images
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip downloading post images
    #[arg(long)]
    no_images: bool,

    /// Minimum post length in characters
    #[arg(long)]
    min_length: Option<usize>,

    /// Debug logging for this crate
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Options::default(),
        };

        if let Some(dir) = &self.output_dir {
            options.output_dir.clone_from(dir);
        }
        if self.no_images {
            options.download_images = false;
        }
        if let Some(len) = self.min_length {
            options.min_content_len = len;
        }

        options.validate()?;
        Ok(options)
    }

    fn read_input(&self) -> Result<Vec<u8>> {
        if self.input.as_os_str() == "-" {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            return Ok(buf);
        }

        std::fs::read(&self.input).with_context(|| format!("failed to read {}", self.input.display()))
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "info,rs_feedposts=debug,extract_posts=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.options()?;
    let html = cli.read_input()?;

    tracing::info!("extracting posts from {}", cli.input.display());
    let report = harvest(&html, &options).await?;

    if report.images.failed > 0 {
        tracing::warn!("{} images could not be saved", report.images.failed);
    }
    println!("{}", report.json_path.display());

    Ok(())
}
