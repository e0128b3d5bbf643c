use crate::scrapers::jsonld;
use crate::scrapers::types::ScrapeConfig;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static OG_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[property="og:image"]"#).expect("valid selector"));

/// Full-size photo URL shapes of the supported listing sites, tried in order:
/// Zillow, Redfin, Trulia.
static PHOTO_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r#"https://photos\.zillowstatic\.com/[^"']+(?:uncropped_scaled_within_\d+|_d\.jpg)"#)
            .expect("valid regex"),
        Regex::new(r#"https://ssl\.cdn-redfin\.com/photo/\d+/[^"']+\.jpg"#).expect("valid regex"),
        Regex::new(r#"https://[^"']*ap\.rdcpix\.com[^"']+\.jpg"#).expect("valid regex"),
    ]
});

/// Collect the listing's photo URLs.
///
/// Sources are a cascade, each consulted only when everything before it came
/// up empty: the JSON-LD `image` field, then the photo-host patterns, then the
/// `og:image` meta tag. The result is de-duplicated in first-seen order,
/// stripped of thumbnails, and capped at `config.max_images`.
pub fn extract_image_urls(html: &str, document: &Html, config: &ScrapeConfig) -> Vec<String> {
    let mut urls = from_json_ld(document);
    debug!(count = urls.len(), "JSON-LD image candidates");

    if urls.is_empty() {
        urls = from_photo_patterns(html);
        debug!(count = urls.len(), "Pattern-scan image candidates");
    }

    if urls.is_empty() {
        urls.extend(
            document
                .select(&OG_IMAGE)
                .next()
                .and_then(|meta| meta.value().attr("content"))
                .map(str::to_string),
        );
        debug!(count = urls.len(), "og:image candidates");
    }

    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.clone()))
        .filter(|url| !is_thumbnail(url, &config.thumbnail_markers))
        .take(config.max_images)
        .collect()
}

fn from_json_ld(document: &Html) -> Vec<String> {
    let Some(entity) = jsonld::listing_entity(document) else {
        return Vec::new();
    };

    match entity.get("image") {
        Some(Value::Array(items)) => items.iter().filter_map(image_url).collect(),
        Some(single) => image_url(single).into_iter().collect(),
        None => Vec::new(),
    }
}

/// A JSON-LD image entry is either a URL string or an `ImageObject`
fn image_url(entry: &Value) -> Option<String> {
    match entry {
        Value::String(url) => Some(url.clone()),
        Value::Object(object) => object
            .get("url")
            .or_else(|| object.get("contentUrl"))
            .and_then(Value::as_str)
            .map(str::to_string),
        other => {
            debug!(entry = %other, "Skipping unsupported JSON-LD image entry");
            None
        }
    }
}

fn from_photo_patterns(html: &str) -> Vec<String> {
    PHOTO_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(html).map(|m| m.as_str().to_string()))
        .collect()
}

fn is_thumbnail(url: &str, markers: &[String]) -> bool {
    let lower = url.to_lowercase();
    markers.iter().any(|marker| lower.contains(marker.as_str()))
}
