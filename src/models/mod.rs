use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A fetched listing page
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub url: String,
    pub html: String,
}

/// Best-effort property metadata scraped from a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PropertyInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baths: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyInfo {
    pub fn is_empty(&self) -> bool {
        self.address.is_none()
            && self.price.is_none()
            && self.beds.is_none()
            && self.baths.is_none()
            && self.description.is_none()
    }
}

/// Outcome of downloading a single image
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadResult {
    Saved { url: String, path: PathBuf, bytes: usize },
    Failed { url: String, reason: String },
}

impl DownloadResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            DownloadResult::Saved { path, .. } => Some(path),
            DownloadResult::Failed { .. } => None,
        }
    }
}

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub output_dir: PathBuf,
    pub property: PropertyInfo,
    pub image_urls: Vec<String>,
    pub results: Vec<DownloadResult>,
}

impl ScrapeReport {
    /// Report for a run that stopped before any image was attempted
    pub fn empty(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            property: PropertyInfo::default(),
            image_urls: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Paths of the saved images, in download order
    pub fn downloaded(&self) -> Vec<&Path> {
        self.results.iter().filter_map(DownloadResult::path).collect()
    }
}
