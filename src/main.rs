mod models;
mod scrapers;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use models::DownloadResult;
use scrapers::{ListingScraper, ScrapeConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "listing-images")]
#[command(about = "Download the photos of a Zillow, Redfin or Trulia listing")]
#[command(version)]
struct Cli {
    /// Listing URL (must start with http:// or https://)
    url: String,

    /// Output directory [default: listing_images_<YYYYmmdd_HHMMSS>]
    output_dir: Option<PathBuf>,

    /// Timeout for the listing page request, in seconds
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    page_timeout: u64,

    /// Timeout for each image request, in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    image_timeout: u64,

    /// Maximum number of images to download
    #[arg(
        long,
        default_value_t = 20,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    max_images: usize,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn", value_enum)]
    log_level: LogLevel,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Only the scheme prefix is checked; anything else is left to the request
fn validate_url(url: &str) -> Result<()> {
    anyhow::ensure!(
        url.starts_with("http"),
        "Please provide a valid URL starting with http:// or https://"
    );
    Ok(())
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(format!(
        "listing_images_{}",
        Local::now().format("%Y%m%d_%H%M%S")
    ))
}

fn init_logging(level: &LogLevel) {
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = validate_url(&cli.url) {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }

    init_logging(&cli.log_level);

    let config = ScrapeConfig {
        page_timeout: Duration::from_secs(cli.page_timeout),
        image_timeout: Duration::from_secs(cli.image_timeout),
        max_images: cli.max_images,
        ..Default::default()
    };
    let output_dir = cli.output_dir.unwrap_or_else(default_output_dir);
    info!(url = %cli.url, output_dir = %output_dir.display(), "Starting listing download");

    let scraper = ListingScraper::new(config)?;
    let report = scraper.scrape(&cli.url, &output_dir).await?;

    for result in &report.results {
        match result {
            DownloadResult::Saved { url, path, bytes } => {
                debug!(url = %url, path = %path.display(), bytes, "Saved");
            }
            DownloadResult::Failed { url, reason } => {
                debug!(url = %url, reason = %reason, "Skipped");
            }
        }
    }

    if report.downloaded().is_empty() {
        println!("\n💡 If automatic download fails, try:");
        println!("   1. Open the listing in your browser");
        println!("   2. Open Developer Tools (F12)");
        println!("   3. Go to Network tab, filter by 'Img'");
        println!("   4. Refresh page and right-click large images → 'Open in new tab'");
        println!("   5. Save each image manually into {}", report.output_dir.display());
    }

    Ok(())
}
