pub mod client;
pub mod download;
pub mod images;
pub mod jsonld;
pub mod listing;
pub mod metadata;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use listing::ListingScraper;
pub use types::ScrapeConfig;
