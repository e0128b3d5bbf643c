use std::time::Duration;

/// Browser-mimicking request headers sent with every request.
///
/// `Accept-Encoding` is left to the HTTP client so compressed bodies are
/// decoded transparently.
const BROWSER_HEADERS: &[(&str, &str)] = &[
    ("User-Agent", "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"),
    ("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Connection", "keep-alive"),
    ("Upgrade-Insecure-Requests", "1"),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "none"),
    ("Sec-Fetch-User", "?1"),
    ("Cache-Control", "max-age=0"),
    ("sec-ch-ua", "\"Not_A Brand\";v=\"8\", \"Chromium\";v=\"120\", \"Google Chrome\";v=\"120\""),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"macOS\""),
    ("DNT", "1"),
    ("Referer", "https://www.google.com/"),
];

/// Substrings marking a URL as a thumbnail
const THUMBNAIL_MARKERS: &[&str] = &["thumb", "small", "150x", "200x", "300x"];

/// Settings for one scrape run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Header set shared by the page fetch and every image download
    pub headers: Vec<(String, String)>,
    /// Timeout for the listing page request
    pub page_timeout: Duration,
    /// Timeout for each image request
    pub image_timeout: Duration,
    /// Maximum number of images kept after filtering
    pub max_images: usize,
    /// Lowercase substrings that disqualify an image URL
    pub thumbnail_markers: Vec<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            headers: BROWSER_HEADERS
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            page_timeout: Duration::from_secs(15),
            image_timeout: Duration::from_secs(10),
            max_images: 20,
            thumbnail_markers: THUMBNAIL_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}
