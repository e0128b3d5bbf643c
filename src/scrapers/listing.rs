use crate::models::{ListingPage, PropertyInfo, ScrapeReport};
use crate::scrapers::client::HttpClient;
use crate::scrapers::download::download_images;
use crate::scrapers::images::extract_image_urls;
use crate::scrapers::metadata::extract_property_info;
use crate::scrapers::traits::{get_ok, FetchError, PageClient};
use crate::scrapers::types::ScrapeConfig;
use anyhow::{Context, Result};
use reqwest::Url;
use scraper::Html;
use std::path::Path;
use tracing::{debug, info, warn};

/// Sites whose photo hosts the pattern scan recognises
const SUPPORTED_HOSTS: &[&str] = &["zillow.com", "trulia.com", "redfin.com"];

/// Fetches one listing page and downloads its photos
pub struct ListingScraper<C> {
    client: C,
    config: ScrapeConfig,
}

impl ListingScraper<HttpClient> {
    /// Create a scraper backed by a real HTTP client
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let client = HttpClient::new(&config)?;
        Ok(Self::with_client(client, config))
    }
}

impl<C: PageClient> ListingScraper<C> {
    pub fn with_client(client: C, config: ScrapeConfig) -> Self {
        Self { client, config }
    }

    /// Fetch the listing page; any non-2xx status is an error
    pub async fn fetch_page(&self, url: &str) -> Result<ListingPage, FetchError> {
        let response = get_ok(&self.client, url, self.config.page_timeout).await?;
        let html = response.text();
        debug!(url = %url, bytes = html.len(), "Downloaded listing HTML");
        Ok(ListingPage {
            url: url.to_string(),
            html,
        })
    }

    /// Run the whole pipeline for `url`, writing into `output_dir`.
    ///
    /// A page that cannot be fetched or has no photos yields an empty report
    /// rather than an error; only local filesystem failures are returned.
    pub async fn scrape(&self, url: &str, output_dir: &Path) -> Result<ScrapeReport> {
        println!("🔍 Fetching listing from: {url}\n");

        if !is_supported_host(url) {
            warn!(url = %url, "Not a Zillow, Trulia or Redfin listing; photo detection may miss images");
        }

        if !output_dir.exists() {
            tokio::fs::create_dir_all(output_dir)
                .await
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;
            println!("📁 Created directory: {}\n", output_dir.display());
        }

        let mut report = ScrapeReport::empty(output_dir.to_path_buf());

        let page = match self.fetch_page(url).await {
            Ok(page) => page,
            Err(e) => {
                let e = anyhow::Error::from(e);
                warn!(error = %format!("{e:#}"), "Listing fetch failed");
                println!("❌ Error fetching page: {e:#}");
                println!("\n💡 Try opening the URL in your browser, then:");
                println!("   1. Right-click → Save Page As → Complete");
                println!("   2. Copy the photos out of the saved page's _files folder");
                return Ok(report);
            }
        };

        let (property, image_urls) = extract(&page, &self.config);
        report.property = property;

        if !report.property.is_empty() {
            print_property(&report.property);
        }

        if image_urls.is_empty() {
            println!("❌ No images found. The listing may be blocking automated access.");
            println!("\n💡 Alternative method:");
            println!("   1. Open the listing in your browser");
            println!("   2. Right-click on each image → 'Save Image As'");
            return Ok(report);
        }

        println!("✅ Found {} images\n", image_urls.len());
        info!(count = image_urls.len(), "Downloading images");

        report.results =
            download_images(&self.client, &image_urls, output_dir, self.config.image_timeout).await;
        report.image_urls = image_urls;

        if !report.property.is_empty() {
            let info_file = output_dir.join("property_info.json");
            let json = serde_json::to_string_pretty(&report.property)?;
            tokio::fs::write(&info_file, json)
                .await
                .with_context(|| format!("Failed to write {}", info_file.display()))?;
            println!("\n💾 Saved property info to: property_info.json");
        }

        println!(
            "\n🎉 Downloaded {}/{} images to: {}",
            report.downloaded().len(),
            report.image_urls.len(),
            output_dir.display()
        );

        Ok(report)
    }
}

/// Parse the page once and run both extractors over it
fn extract(page: &ListingPage, config: &ScrapeConfig) -> (PropertyInfo, Vec<String>) {
    let document = Html::parse_document(&page.html);
    let property = extract_property_info(&page.html, &document);
    let image_urls = extract_image_urls(&page.html, &document, config);
    debug!(url = %page.url, images = image_urls.len(), "Extraction finished");
    (property, image_urls)
}

fn print_property(info: &PropertyInfo) {
    let or_na = |field: &Option<String>| field.clone().unwrap_or_else(|| "N/A".to_string());
    println!("🏠 Property Details:");
    println!("   Address: {}", or_na(&info.address));
    println!("   Price: {}", or_na(&info.price));
    println!("   Beds: {} | Baths: {}", or_na(&info.beds), or_na(&info.baths));
    println!();
}

/// Whether the URL belongs to one of the listing sites with known photo hosts
pub fn is_supported_host(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    SUPPORTED_HOSTS
        .iter()
        .any(|site| host == *site || host.ends_with(&format!(".{site}")))
}
